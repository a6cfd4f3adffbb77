pub mod action;
pub mod address;
pub mod assignment;
pub mod content;
pub mod draft;
pub mod loaders;

pub use action::{ActionDraft, ActionKind, DefineAction, FillAction, IllustrateAction, ImageOption, ImageSource, WordAction};
pub use address::WordAddress;
pub use assignment::{AssignmentMetadata, AssignmentPayload, StoredAssignment};
pub use content::{ContentDocument, ContentSummary, Sentence, Word};
pub use draft::{DraftActionEntry, DraftFile};
pub use loaders::{load_all_drafts, load_draft};
