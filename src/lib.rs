pub mod estimators;
pub mod roots;
pub mod streams;
