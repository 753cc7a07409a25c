// Domain-layer modules and shared errors/models
pub mod estimator {
    pub use crate::estimator::*;
}

pub mod stages {
    pub use crate::decision;
    pub use crate::distance;
    pub use crate::fuel;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
