pub mod authoring_ctx;
pub mod authoring_flow;
pub mod authoring_step;

pub use authoring_ctx::DraftCtx;
pub use authoring_flow::{AssignmentDraft, AuthoringSession};
pub use authoring_step::AuthoringStep;
