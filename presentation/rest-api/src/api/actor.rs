use poem::web::RemoteAddr;
use poem_openapi::payload::Json;
use uuid::Uuid;

use business::domain::shared::value_objects::Actor;

use crate::api::error::{ErrorResponse, bad_request};

/// Builds the request actor from the `x-actor-id` header and the peer address.
/// A missing header means an anonymous actor; a malformed one is rejected.
pub fn resolve_actor(
    header: Option<&str>,
    remote: &RemoteAddr,
) -> Result<Actor, Json<ErrorResponse>> {
    let user_id = match header.map(str::trim).filter(|h| !h.is_empty()) {
        Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| bad_request("actor.invalid_id"))?),
        None => None,
    };
    let ip_address = remote.as_socket_addr().map(|addr| addr.ip().to_string());

    Ok(Actor::new(user_id, ip_address))
}

/// Like [`resolve_actor`] but the user id is mandatory (stock movements).
pub fn require_actor_id(header: Option<&str>) -> Result<Uuid, Json<ErrorResponse>> {
    header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| bad_request("actor.required"))
        .and_then(|raw| Uuid::parse_str(raw).map_err(|_| bad_request("actor.invalid_id")))
}
