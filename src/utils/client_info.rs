//! Click metadata extraction from HTTP request headers.

use axum::http::{HeaderMap, header};
use std::net::{IpAddr, SocketAddr};

use crate::domain::entities::ClickMetadata;

/// Country headers set by common CDNs and reverse proxies, checked in order.
const COUNTRY_HEADERS: &[&str] = &["cf-ipcountry", "x-country-code", "cloudfront-viewer-country"];

/// Builds [`ClickMetadata`] for a redirect request.
///
/// - `source` comes from the `Referer` header
/// - `user_agent` from `User-Agent`
/// - `client_address` from the peer socket, or from proxy headers when
///   `behind_proxy` is set
/// - `location` from [`coarse_location`]
pub fn click_metadata(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> ClickMetadata {
    let client_address = client_address(headers, peer, behind_proxy);
    let location = coarse_location(headers, client_address.as_deref());

    ClickMetadata::new(
        header_str(headers, header::REFERER.as_str()),
        header_str(headers, header::USER_AGENT.as_str()),
        client_address,
        location,
    )
}

/// Resolves the client IP address.
///
/// When `behind_proxy` is true, the first address in `X-Forwarded-For` wins,
/// then `X-Real-IP`. Otherwise the socket peer address is used. Enable
/// `behind_proxy` only behind a trusted reverse proxy: the headers are
/// client-controlled.
pub fn client_address(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        let forwarded = header_str(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| v.parse::<IpAddr>().is_ok());

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }

        let real_ip = header_str(headers, "x-real-ip")
            .map(str::trim)
            .filter(|v| v.parse::<IpAddr>().is_ok());

        if let Some(ip) = real_ip {
            return Some(ip.to_string());
        }
    }

    Some(peer.ip().to_string())
}

/// Derives a coarse, privacy-friendly location for a click.
///
/// A two-letter country header from an upstream proxy takes priority
/// (`XX` / `T1` placeholders are ignored). Without one, loopback clients map
/// to `"Local"` and private or link-local clients to `"Private network"`.
pub fn coarse_location(headers: &HeaderMap, client_address: Option<&str>) -> Option<String> {
    let country = COUNTRY_HEADERS
        .iter()
        .filter_map(|name| header_str(headers, name))
        .map(str::trim)
        .find(|v| v.len() == 2 && v.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
        .filter(|v| v != "XX" && v != "T1");

    if country.is_some() {
        return country;
    }

    let ip: IpAddr = client_address?.parse().ok()?;

    if ip.is_loopback() {
        Some("Local".to_string())
    } else if is_private_or_local(&ip) {
        Some("Private network".to_string())
    } else {
        None
    }
}

/// Returns true for private, loopback and link-local addresses.
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
