mod error;
mod health;
mod process;

pub use error::{ErrorResponse, error_response};
pub use health::{
    HealthResponse, ModelsLoaded, SERVICE_NAME, StatusResponse, health_handler, status_handler,
};
pub use process::{ProcessRequestBody, ProcessResponse, process_handler};
