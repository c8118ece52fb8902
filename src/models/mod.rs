mod article;

pub use article::{Article, BiasScore, Language};
