// Domain Layer - Wire-level entities and pure transformations

pub mod api_key;
pub mod batch;
pub mod error;
pub mod index;
pub mod partial_update;
pub mod polymorphic;
pub mod record;
pub mod rule;
pub mod search;
pub mod settings;
pub mod synonym;
pub mod task;

// Re-exports
pub use api_key::{AddKeyRes, ApiKey, DeleteKeyRes, KeyParams, UpdateKeyRes};
pub use batch::{BatchAction, BatchOperation, BatchRequest};
pub use error::DomainError;
pub use index::{CopyScope, IndexInfo, IndexOperation, ListIndicesRes, OperationKind};
pub use partial_update::{apply_partial_update, PartialUpdateOp};
pub use polymorphic::{Distinct, RemoveStopWords};
pub use record::{ObjectId, Record, OBJECT_ID};
pub use rule::{
    Anchoring, AutomaticFacetFilter, Edit, EditType, HiddenObject, PromotedObject, Rule,
    RuleCondition, RuleConsequence, RuleSearchResult, TimeRange,
};
pub use search::{
    validate_search_params, BrowsePage, FacetHit, FacetSearchResult, SearchParams, SearchResult,
};
pub use settings::Settings;
pub use synonym::{AltCorrectionType, Synonym, SynonymSearchResult};
pub use task::{TaskId, TaskReceipt, TaskStatus, TaskStatusRes};
