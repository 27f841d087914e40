/// Business logic layer
///
/// Services own the authorization and data-consistency rules: ownership
/// checks (existence before ownership, so a missing entity is NotFound and
/// never Forbidden), the one-reaction-per-user-per-post upsert, and the
/// filter/pagination contracts. They depend only on the store traits in
/// `crate::db`.
pub mod accounts;
pub mod comments;
pub mod posts;
pub mod reactions;

pub use accounts::{AccountService, RegisterPayload, UpdateMePayload};
pub use comments::CommentService;
pub use posts::PostService;
pub use reactions::ReactionService;
