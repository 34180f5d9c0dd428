//! External process execution

pub mod command_executor;
pub mod swagger_codegen;

pub use command_executor::*;
pub use swagger_codegen::SwaggerCodegenCli;
