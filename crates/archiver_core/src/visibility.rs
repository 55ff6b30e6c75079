/// Vertical extent of a rendered element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub bottom: f64,
}

/// Eligibility rule for items relative to the viewport.
///
/// The strict rule skips partially visible items and leaves them to a later
/// scroll step or selection pass; the loose rule accepts any overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityPolicy {
    #[default]
    RequireFullyVisible,
    AllowPartial,
}

impl VisibilityPolicy {
    /// Whether an element with the given rect may be clicked right now.
    pub fn admits(self, rect: ElementRect, viewport_height: f64) -> bool {
        match self {
            VisibilityPolicy::RequireFullyVisible => {
                rect.top >= 0.0 && rect.bottom <= viewport_height
            }
            VisibilityPolicy::AllowPartial => rect.bottom > 0.0 && rect.top < viewport_height,
        }
    }
}
