use std::str::FromStr;

use glam::Vec2;
use thiserror::Error;

/// An axis aligned rectangle in screen space, where +Y points down.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub position: Vec2,
    /// Width (x) and height (y).
    pub size: Vec2,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create a rectangle of `size` whose center is `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size * 0.5,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Move the rectangle by `delta` without changing its size.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Get the screen position of a named point on this rectangle.
    pub fn anchor(&self, anchor: Anchor) -> Vec2 {
        let Vec2 { x: left, y: top } = self.position;
        let Vec2 { x: right, y: bottom } = self.position + self.size;
        let Vec2 { x: mid_x, y: mid_y } = self.center();

        match anchor {
            Anchor::TopLeft => Vec2::new(left, top),
            Anchor::MidTop => Vec2::new(mid_x, top),
            Anchor::TopRight => Vec2::new(right, top),
            Anchor::MidLeft => Vec2::new(left, mid_y),
            Anchor::Center => Vec2::new(mid_x, mid_y),
            Anchor::MidRight => Vec2::new(right, mid_y),
            Anchor::BottomLeft => Vec2::new(left, bottom),
            Anchor::MidBottom => Vec2::new(mid_x, bottom),
            Anchor::BottomRight => Vec2::new(right, bottom),
        }
    }
}

/// Named points on a rectangle that can be used as a rotation pivot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    MidTop,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    MidBottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::MidTop,
        Anchor::TopRight,
        Anchor::MidLeft,
        Anchor::Center,
        Anchor::MidRight,
        Anchor::BottomLeft,
        Anchor::MidBottom,
        Anchor::BottomRight,
    ];

    /// Canonical lower case name, eg "midbottom".
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "topleft",
            Anchor::MidTop => "midtop",
            Anchor::TopRight => "topright",
            Anchor::MidLeft => "midleft",
            Anchor::Center => "center",
            Anchor::MidRight => "midright",
            Anchor::BottomLeft => "bottomleft",
            Anchor::MidBottom => "midbottom",
            Anchor::BottomRight => "bottomright",
        }
    }
}

impl FromStr for Anchor {
    type Err = InvalidOriginSpec;

    /// Names are matched ignoring case and any `_`, `-` or space separators so
    /// "midbottom", "mid_bottom" and "Mid Bottom" are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.name() == normalized)
            .ok_or_else(|| InvalidOriginSpec(s.to_string()))
    }
}

/// Describes where a sprite's rotation pivot is located.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OriginSpec {
    /// A named point on the sprite's initial bounding rectangle.
    Anchor(Anchor),
    /// An explicit screen position.
    Point(Vec2),
}

impl OriginSpec {
    /// Resolve this origin to a screen position using `rect` for anchors.
    pub fn resolve(&self, rect: &Rect) -> Vec2 {
        match self {
            OriginSpec::Anchor(anchor) => rect.anchor(*anchor),
            OriginSpec::Point(point) => *point,
        }
    }
}

impl From<Anchor> for OriginSpec {
    fn from(anchor: Anchor) -> Self {
        OriginSpec::Anchor(anchor)
    }
}

impl From<Vec2> for OriginSpec {
    fn from(point: Vec2) -> Self {
        OriginSpec::Point(point)
    }
}

impl FromStr for OriginSpec {
    type Err = InvalidOriginSpec;

    /// Parses either an anchor name or an `x,y` coordinate pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidOriginSpec(s.to_string());

        if let Some((x, y)) = s.trim().split_once(',') {
            let x: f32 = x.trim().parse().map_err(|_| invalid())?;
            let y: f32 = y.trim().parse().map_err(|_| invalid())?;

            if !(x.is_finite() && y.is_finite()) {
                return Err(invalid());
            }

            Ok(OriginSpec::Point(Vec2::new(x, y)))
        } else {
            Ok(OriginSpec::Anchor(s.trim().parse().map_err(|_| invalid())?))
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("origin `{}` is neither a rectangle anchor name nor an `x,y` point", .0)]
pub struct InvalidOriginSpec(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> Rect {
        Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(60.0, 40.0))
    }

    #[test]
    fn from_center_round_trips() {
        let rect = test_rect();
        assert_eq!(Vec2::new(70.0, 80.0), rect.position);
        assert_eq!(Vec2::new(100.0, 100.0), rect.center());
    }

    #[test]
    fn anchors_resolve_to_rect_edges() {
        let rect = test_rect();

        assert_eq!(Vec2::new(70.0, 80.0), rect.anchor(Anchor::TopLeft));
        assert_eq!(Vec2::new(130.0, 80.0), rect.anchor(Anchor::TopRight));
        assert_eq!(Vec2::new(100.0, 120.0), rect.anchor(Anchor::MidBottom));
        assert_eq!(Vec2::new(130.0, 100.0), rect.anchor(Anchor::MidRight));
        assert_eq!(Vec2::new(70.0, 120.0), rect.anchor(Anchor::BottomLeft));
        assert_eq!(rect.center(), rect.anchor(Anchor::Center));
    }

    #[test]
    fn anchor_names_parse() {
        for anchor in Anchor::ALL {
            assert_eq!(Ok(anchor), anchor.name().parse());
        }

        assert_eq!(Ok(Anchor::MidBottom), "Mid_Bottom".parse());
        assert_eq!(Ok(Anchor::TopRight), "top-right".parse());
    }

    #[test]
    fn origin_points_parse() {
        assert_eq!(
            Ok(OriginSpec::Point(Vec2::new(270.0, 280.0))),
            "270, 280".parse()
        );
        assert_eq!(Ok(OriginSpec::Anchor(Anchor::Center)), "center".parse());
    }

    #[test]
    fn unrecognized_origins_are_rejected() {
        for bad in ["", "middle", "1,2,3", "x,4", "NaN,1", "inf,0"] {
            let result: Result<OriginSpec, _> = bad.parse();
            assert_eq!(Err(InvalidOriginSpec(bad.to_string())), result);
        }
    }

    #[test]
    fn resolve_uses_rect_only_for_anchors() {
        let rect = test_rect();
        let point = Vec2::new(-4.0, 9.0);

        assert_eq!(point, OriginSpec::from(point).resolve(&rect));
        assert_eq!(
            Vec2::new(100.0, 80.0),
            OriginSpec::from(Anchor::MidTop).resolve(&rect)
        );
    }
}
