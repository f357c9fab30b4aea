pub mod collector;
pub mod enricher;
pub mod github;
pub mod reconciler;
pub mod validator;
pub mod writer;
