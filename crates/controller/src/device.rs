use storefront_common::DeviceClassPreference;

/// Widest screen (logical pixels) still treated as a phone or tablet.
pub const CONSTRAINED_MAX_WIDTH: f32 = 1024.0;

const MOBILE_AGENT_KEYWORDS: [&str; 9] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
    "tablet",
];

/// Coarse device classification selecting the movement bounds.
///
/// Resolved once at startup; a heuristic, not a capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Phones and tablets: stay near the shop and come back through the door.
    Constrained,
    /// Mouse and keyboard: free to explore the street.
    Desktop,
}

/// What the shell knows about the device at startup.
#[derive(Debug, Clone, Default)]
pub struct DeviceHints {
    pub screen_width: f32,
    pub has_touch: bool,
    pub user_agent: Option<String>,
}

impl DeviceClass {
    pub fn detect(hints: &DeviceHints) -> Self {
        let small_screen = hints.screen_width <= CONSTRAINED_MAX_WIDTH;
        let mobile_agent = hints.user_agent.as_deref().is_some_and(|ua| {
            let ua = ua.to_ascii_lowercase();
            MOBILE_AGENT_KEYWORDS.iter().any(|k| ua.contains(k))
        });
        let class = if small_screen || (hints.has_touch && mobile_agent) {
            DeviceClass::Constrained
        } else {
            DeviceClass::Desktop
        };
        tracing::debug!(?class, width = hints.screen_width, touch = hints.has_touch, "device class detected");
        class
    }

    /// Honour an explicit preference, otherwise detect.
    pub fn resolve(preference: DeviceClassPreference, hints: &DeviceHints) -> Self {
        match preference {
            DeviceClassPreference::Auto => Self::detect(hints),
            DeviceClassPreference::Constrained => DeviceClass::Constrained,
            DeviceClassPreference::Desktop => DeviceClass::Desktop,
        }
    }
}
