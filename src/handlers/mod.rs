/// HTTP request handlers
///
/// Thin binding between the route table and the service layer: handlers
/// deserialize the request, hand it to a service with the authenticated
/// caller (where required), and map the result onto the response contract.
pub mod accounts;
pub mod comments;
pub mod posts;
pub mod reactions;
