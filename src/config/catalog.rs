//! Static reference data for the qkamura booking provider.
//!
//! The site IDs and room catalogs are provider-assigned and change rarely; the
//! two tables must stay keyed by the same location names.

/// Location names accepted by `--location`.
pub fn known_locations() -> &'static [&'static str] {
    &["tateyama", "izu"]
}

/// Provider-internal numeric site ID for a location.
pub fn site_id(location: &str) -> Option<u32> {
    match location {
        "tateyama" => Some(23260012),
        "izu" => Some(31260022),
        _ => None,
    }
}

/// Room catalog (provider room ID, human-readable description) for a location.
pub fn rooms(location: &str) -> Option<&'static [(u32, &'static str)]> {
    match location {
        "tateyama" => Some(&[
            (
                1,
                "【オーシャンビュー／禁煙／３０㎡】<br>和室１０畳　バス・トイレ・広縁付き",
            ),
            (3, "【オーシャンビュー／禁煙】　洋室ツイン　バス・トイレ付"),
            (
                4,
                "【オーシャンビュー／禁煙／３０㎡】<br>洋室ツイン　トイレ付き",
            ),
            (
                7,
                "【オーシャンビュー／禁煙／３０㎡】<br>和洋室ツイン　小上がりの座敷・トイレ付き",
            ),
        ]),
        "izu" => Some(&[
            (1, "和洋室・禁煙"),
            (2, "和室・禁煙"),
            (5, "洋室・禁煙"),
        ]),
        _ => None,
    }
}

pub fn room_description(location: &str, room_id: u32) -> Option<&'static str> {
    rooms(location)?
        .iter()
        .find(|(id, _)| *id == room_id)
        .map(|(_, description)| *description)
}
