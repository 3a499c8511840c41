//! CSS selectors targeted by Datastar patches.

pub const LISTING_PANEL: &str = "[data-listing-panel]";
