use actix_web::{web, HttpRequest, HttpResponse};
use std::net::IpAddr;

use crate::models::Location;
use crate::services::GeoLocator;

/// Caller address: first `X-Forwarded-For` entry, else the socket peer.
/// IPv4-mapped IPv6 addresses are reported in their IPv4 form.
pub fn client_ip(req: &HttpRequest) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let ip = forwarded
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_default();

    match ip.strip_prefix("::ffff:") {
        Some(v4) => v4.to_string(),
        None => ip,
    }
}

/// Loopback callers (local development) are looked up by the provider's
/// own view of the request instead.
fn lookup_target(ip: &str) -> &str {
    match ip.parse::<IpAddr>() {
        Ok(addr) if addr.is_loopback() => "",
        _ => ip,
    }
}

#[utoipa::path(
    get,
    path = "/api/location",
    tag = "Location",
    responses(
        (status = 200, description = "Location of the caller", body = Location),
        (status = 500, description = "Provider failure, fields reported as Unknown")
    )
)]
pub async fn get_location(req: HttpRequest, locator: web::Data<dyn GeoLocator>) -> HttpResponse {
    let ip = client_ip(&req);

    match locator.locate(lookup_target(&ip)).await {
        Ok(lookup) => HttpResponse::Ok().json(Location::from_lookup(lookup, &ip)),
        Err(e) => {
            log::error!("❌ Failed to fetch location for '{}': {}", ip, e);
            let unknown = Location::unknown(&ip);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Failed to fetch location",
                "country_name": unknown.country_name,
                "region": unknown.region,
                "city": unknown.city,
                "ip": unknown.ip
            }))
        }
    }
}
