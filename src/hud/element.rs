//! HUD element schema
//!
//! Scripts describe elements with one flat record ([`HudElementDef`]) that
//! carries every field for every kind. Inside the HUD an element is a
//! [`HudElement`] variant holding only the fields its kind interprets, so
//! irrelevant fields never become live state.
//!
//! Updates address a single field through [`StatUpdate`]. The per-kind
//! field table lives in [`HudElementKind::accepts`]; an update for a field
//! the kind does not carry is dropped, never rejected.

use glam::{DVec3, IVec2, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::HudError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudElementKind {
    Image,
    Text,
    StatBar,
    Inventory,
    Waypoint,
}

impl HudElementKind {
    /// Whether elements of this kind carry the field named by `stat`
    pub fn accepts(self, stat: HudStat) -> bool {
        use HudStat::*;
        match self {
            HudElementKind::Image => matches!(stat, Position | Name | Scale | Alignment | Offset),
            HudElementKind::Text => matches!(
                stat,
                Position | Name | Scale | Text | Number | Alignment | Offset
            ),
            HudElementKind::StatBar => matches!(
                stat,
                Position | Name | Text | Number | Direction | Offset | Size
            ),
            HudElementKind::Inventory => matches!(
                stat,
                Position | Name | Text | Number | Item | Direction | Offset
            ),
            HudElementKind::Waypoint => matches!(stat, Name | Text | Number | WorldPosition),
        }
    }
}

/// One individually updatable field of a HUD element
///
/// Discriminants follow field order and double as the numeric wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudStat {
    Position = 0,
    Name,
    Scale,
    Text,
    Number,
    Item,
    Direction,
    Alignment,
    Offset,
    WorldPosition,
    Size,
}

impl HudStat {
    pub const ALL: [HudStat; 11] = [
        HudStat::Position,
        HudStat::Name,
        HudStat::Scale,
        HudStat::Text,
        HudStat::Number,
        HudStat::Item,
        HudStat::Direction,
        HudStat::Alignment,
        HudStat::Offset,
        HudStat::WorldPosition,
        HudStat::Size,
    ];
}

impl TryFrom<u8> for HudStat {
    type Error = HudError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        HudStat::ALL
            .get(id as usize)
            .copied()
            .ok_or(HudError::UnknownStat(id))
    }
}

/// Growth direction for stat bars and inventory previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudDirection {
    #[default]
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
}

impl HudDirection {
    /// Decodes the numeric wire value; unknown values fall back to left-to-right
    pub fn from_wire(value: u32) -> Self {
        match value {
            1 => HudDirection::RightLeft,
            2 => HudDirection::TopBottom,
            3 => HudDirection::BottomTop,
            _ => HudDirection::LeftRight,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, HudDirection::TopBottom | HudDirection::BottomTop)
    }
}

/// Flat element description as sent by scripts
///
/// Every field exists regardless of kind; unset fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudElementDef {
    pub kind: HudElementKind,
    pub position: Vec2,
    pub name: String,
    pub scale: Vec2,
    pub text: String,
    pub number: u32,
    pub item: u32,
    pub direction: HudDirection,
    pub alignment: Vec2,
    pub offset: Vec2,
    pub world_position: DVec3,
    pub size: IVec2,
}

impl Default for HudElementDef {
    fn default() -> Self {
        HudElementDef {
            kind: HudElementKind::Text,
            position: Vec2::ZERO,
            name: String::new(),
            scale: Vec2::ZERO,
            text: String::new(),
            number: 0,
            item: 0,
            direction: HudDirection::LeftRight,
            alignment: Vec2::ZERO,
            offset: Vec2::ZERO,
            world_position: DVec3::ZERO,
            size: IVec2::ZERO,
        }
    }
}

impl HudElementDef {
    pub fn new(kind: HudElementKind) -> Self {
        HudElementDef {
            kind,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub position: Vec2,
    /// Texture to draw
    pub name: String,
    pub scale: Vec2,
    pub alignment: Vec2,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub position: Vec2,
    pub name: String,
    /// Clip box: x in pixels, y in text lines
    pub scale: Vec2,
    pub text: String,
    /// Packed 0xRRGGBB
    pub number: u32,
    pub alignment: Vec2,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatBarElement {
    pub position: Vec2,
    pub name: String,
    /// Icon texture
    pub text: String,
    /// Half-icon count
    pub number: u32,
    pub direction: HudDirection,
    pub offset: Vec2,
    /// Icon size override, zero keeps the texture size
    pub size: IVec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryElement {
    pub position: Vec2,
    pub name: String,
    /// Inventory list to preview
    pub text: String,
    /// Number of slots shown
    pub number: u32,
    /// Selected slot, 1-based; 0 selects nothing
    pub item: u32,
    pub direction: HudDirection,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaypointElement {
    /// Label, first line
    pub name: String,
    /// Suffix after the distance, second line
    pub text: String,
    /// Packed 0xRRGGBB
    pub number: u32,
    pub world_position: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HudElement {
    Image(ImageElement),
    Text(TextElement),
    StatBar(StatBarElement),
    Inventory(InventoryElement),
    Waypoint(WaypointElement),
}

impl From<HudElementDef> for HudElement {
    fn from(def: HudElementDef) -> Self {
        match def.kind {
            HudElementKind::Image => HudElement::Image(ImageElement {
                position: def.position,
                name: def.name,
                scale: def.scale,
                alignment: def.alignment,
                offset: def.offset,
            }),
            HudElementKind::Text => HudElement::Text(TextElement {
                position: def.position,
                name: def.name,
                scale: def.scale,
                text: def.text,
                number: def.number,
                alignment: def.alignment,
                offset: def.offset,
            }),
            HudElementKind::StatBar => HudElement::StatBar(StatBarElement {
                position: def.position,
                name: def.name,
                text: def.text,
                number: def.number,
                direction: def.direction,
                offset: def.offset,
                size: def.size,
            }),
            HudElementKind::Inventory => HudElement::Inventory(InventoryElement {
                position: def.position,
                name: def.name,
                text: def.text,
                number: def.number,
                item: def.item,
                direction: def.direction,
                offset: def.offset,
            }),
            HudElementKind::Waypoint => HudElement::Waypoint(WaypointElement {
                name: def.name,
                text: def.text,
                number: def.number,
                world_position: def.world_position,
            }),
        }
    }
}

impl HudElement {
    pub fn kind(&self) -> HudElementKind {
        match self {
            HudElement::Image(_) => HudElementKind::Image,
            HudElement::Text(_) => HudElementKind::Text,
            HudElement::StatBar(_) => HudElementKind::StatBar,
            HudElement::Inventory(_) => HudElementKind::Inventory,
            HudElement::Waypoint(_) => HudElementKind::Waypoint,
        }
    }

    /// Writes one field
    ///
    /// Returns false, leaving the element untouched, when this kind does
    /// not carry the field.
    pub fn apply(&mut self, update: StatUpdate) -> bool {
        if !self.kind().accepts(update.stat()) {
            return false;
        }

        use HudElement as E;
        match (self, update) {
            (E::Image(e), StatUpdate::Position(v)) => e.position = v,
            (E::Text(e), StatUpdate::Position(v)) => e.position = v,
            (E::StatBar(e), StatUpdate::Position(v)) => e.position = v,
            (E::Inventory(e), StatUpdate::Position(v)) => e.position = v,

            (E::Image(e), StatUpdate::Name(s)) => e.name = s,
            (E::Text(e), StatUpdate::Name(s)) => e.name = s,
            (E::StatBar(e), StatUpdate::Name(s)) => e.name = s,
            (E::Inventory(e), StatUpdate::Name(s)) => e.name = s,
            (E::Waypoint(e), StatUpdate::Name(s)) => e.name = s,

            (E::Image(e), StatUpdate::Scale(v)) => e.scale = v,
            (E::Text(e), StatUpdate::Scale(v)) => e.scale = v,

            (E::Text(e), StatUpdate::Text(s)) => e.text = s,
            (E::StatBar(e), StatUpdate::Text(s)) => e.text = s,
            (E::Inventory(e), StatUpdate::Text(s)) => e.text = s,
            (E::Waypoint(e), StatUpdate::Text(s)) => e.text = s,

            (E::Text(e), StatUpdate::Number(n)) => e.number = n,
            (E::StatBar(e), StatUpdate::Number(n)) => e.number = n,
            (E::Inventory(e), StatUpdate::Number(n)) => e.number = n,
            (E::Waypoint(e), StatUpdate::Number(n)) => e.number = n,

            (E::Inventory(e), StatUpdate::Item(n)) => e.item = n,

            (E::StatBar(e), StatUpdate::Direction(d)) => e.direction = d,
            (E::Inventory(e), StatUpdate::Direction(d)) => e.direction = d,

            (E::Image(e), StatUpdate::Alignment(v)) => e.alignment = v,
            (E::Text(e), StatUpdate::Alignment(v)) => e.alignment = v,

            (E::Image(e), StatUpdate::Offset(v)) => e.offset = v,
            (E::Text(e), StatUpdate::Offset(v)) => e.offset = v,
            (E::StatBar(e), StatUpdate::Offset(v)) => e.offset = v,
            (E::Inventory(e), StatUpdate::Offset(v)) => e.offset = v,

            (E::Waypoint(e), StatUpdate::WorldPosition(p)) => e.world_position = p,

            (E::StatBar(e), StatUpdate::Size(s)) => e.size = s,

            // accepts() already filtered every other pairing
            _ => return false,
        }
        true
    }
}

/// A new value for exactly one stat
#[derive(Debug, Clone, PartialEq)]
pub enum StatUpdate {
    Position(Vec2),
    Name(String),
    Scale(Vec2),
    Text(String),
    Number(u32),
    Item(u32),
    Direction(HudDirection),
    Alignment(Vec2),
    Offset(Vec2),
    WorldPosition(DVec3),
    Size(IVec2),
}

impl StatUpdate {
    pub fn stat(&self) -> HudStat {
        match self {
            StatUpdate::Position(_) => HudStat::Position,
            StatUpdate::Name(_) => HudStat::Name,
            StatUpdate::Scale(_) => HudStat::Scale,
            StatUpdate::Text(_) => HudStat::Text,
            StatUpdate::Number(_) => HudStat::Number,
            StatUpdate::Item(_) => HudStat::Item,
            StatUpdate::Direction(_) => HudStat::Direction,
            StatUpdate::Alignment(_) => HudStat::Alignment,
            StatUpdate::Offset(_) => HudStat::Offset,
            StatUpdate::WorldPosition(_) => HudStat::WorldPosition,
            StatUpdate::Size(_) => HudStat::Size,
        }
    }

    /// The untyped form [`StatUpdate::decode`] reads back
    pub fn to_value(&self) -> Value {
        match self {
            StatUpdate::Position(v)
            | StatUpdate::Scale(v)
            | StatUpdate::Alignment(v)
            | StatUpdate::Offset(v) => json!([v.x, v.y]),
            StatUpdate::Name(s) | StatUpdate::Text(s) => Value::from(s.as_str()),
            StatUpdate::Number(n) | StatUpdate::Item(n) => Value::from(*n),
            StatUpdate::Direction(d) => Value::from(*d as u32),
            StatUpdate::WorldPosition(p) => json!([p.x, p.y, p.z]),
            StatUpdate::Size(s) => json!([s.x, s.y]),
        }
    }

    /// Decodes an untyped bridge value against the shape `stat` expects
    ///
    /// Only the shape is checked. Directions accept either the snake_case
    /// name or the numeric wire value; numbers past `u32` decode as
    /// left-to-right like any other unknown value.
    pub fn decode(stat: HudStat, value: &Value) -> Result<StatUpdate, HudError> {
        fn shaped<T: serde::de::DeserializeOwned>(
            stat: HudStat,
            value: &Value,
            expected: &'static str,
        ) -> Result<T, HudError> {
            serde_json::from_value(value.clone())
                .map_err(|_| HudError::InvalidStat { stat, expected })
        }

        Ok(match stat {
            HudStat::Position => StatUpdate::Position(shaped(stat, value, "[x, y]")?),
            HudStat::Name => StatUpdate::Name(shaped(stat, value, "string")?),
            HudStat::Scale => StatUpdate::Scale(shaped(stat, value, "[x, y]")?),
            HudStat::Text => StatUpdate::Text(shaped(stat, value, "string")?),
            HudStat::Number => StatUpdate::Number(shaped(stat, value, "unsigned integer")?),
            HudStat::Item => StatUpdate::Item(shaped(stat, value, "unsigned integer")?),
            HudStat::Direction => match value.as_u64() {
                Some(raw) => StatUpdate::Direction(
                    u32::try_from(raw).map_or(HudDirection::LeftRight, HudDirection::from_wire),
                ),
                None => StatUpdate::Direction(shaped(stat, value, "direction")?),
            },
            HudStat::Alignment => StatUpdate::Alignment(shaped(stat, value, "[x, y]")?),
            HudStat::Offset => StatUpdate::Offset(shaped(stat, value, "[x, y]")?),
            HudStat::WorldPosition => {
                StatUpdate::WorldPosition(shaped(stat, value, "[x, y, z]")?)
            }
            HudStat::Size => StatUpdate::Size(shaped(stat, value, "[w, h] integers")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stat_ids_follow_field_order() {
        for (i, stat) in HudStat::ALL.iter().enumerate() {
            assert_eq!(*stat as usize, i);
            assert_eq!(HudStat::try_from(i as u8).unwrap(), *stat);
        }
        assert!(matches!(HudStat::try_from(11), Err(HudError::UnknownStat(11))));
    }

    #[test]
    fn test_every_stat_is_carried_by_some_kind() {
        let kinds = [
            HudElementKind::Image,
            HudElementKind::Text,
            HudElementKind::StatBar,
            HudElementKind::Inventory,
            HudElementKind::Waypoint,
        ];
        for stat in HudStat::ALL {
            assert!(kinds.iter().any(|k| k.accepts(stat)), "{:?} unreachable", stat);
        }
    }

    #[test]
    fn test_def_keeps_only_kind_fields() {
        let mut def = HudElementDef::new(HudElementKind::Waypoint);
        def.name = "home".to_string();
        def.position = Vec2::new(0.5, 0.5);
        def.world_position = DVec3::new(1.0, 2.0, 3.0);

        let element = HudElement::from(def);
        match element {
            HudElement::Waypoint(w) => {
                assert_eq!(w.name, "home");
                assert_eq!(w.world_position, DVec3::new(1.0, 2.0, 3.0));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_apply_ignores_foreign_field() {
        let mut element = HudElement::from(HudElementDef::new(HudElementKind::Image));
        let before = element.clone();
        assert!(!element.apply(StatUpdate::WorldPosition(DVec3::ONE)));
        assert!(!element.apply(StatUpdate::Text("ignored".to_string())));
        assert_eq!(element, before);
    }

    #[test]
    fn test_apply_sets_carried_field() {
        let mut element = HudElement::from(HudElementDef::new(HudElementKind::StatBar));
        assert!(element.apply(StatUpdate::Size(IVec2::new(24, 24))));
        assert!(element.apply(StatUpdate::Direction(HudDirection::BottomTop)));
        let HudElement::StatBar(bar) = element else {
            panic!("kind changed");
        };
        assert_eq!(bar.size, IVec2::new(24, 24));
        assert_eq!(bar.direction, HudDirection::BottomTop);
    }

    fn sample_update(stat: HudStat) -> StatUpdate {
        match stat {
            HudStat::Position => StatUpdate::Position(Vec2::new(0.25, 0.75)),
            HudStat::Name => StatUpdate::Name("label".to_string()),
            HudStat::Scale => StatUpdate::Scale(Vec2::new(2.0, 3.0)),
            HudStat::Text => StatUpdate::Text("hello".to_string()),
            HudStat::Number => StatUpdate::Number(7),
            HudStat::Item => StatUpdate::Item(3),
            HudStat::Direction => StatUpdate::Direction(HudDirection::BottomTop),
            HudStat::Alignment => StatUpdate::Alignment(Vec2::new(-1.0, 1.0)),
            HudStat::Offset => StatUpdate::Offset(Vec2::new(5.0, -5.0)),
            HudStat::WorldPosition => StatUpdate::WorldPosition(DVec3::new(1.0, 2.0, 3.0)),
            HudStat::Size => StatUpdate::Size(IVec2::new(4, 4)),
        }
    }

    /// The flat record with just the updated field changed
    fn def_with(kind: HudElementKind, update: &StatUpdate) -> HudElementDef {
        let mut def = HudElementDef::new(kind);
        match update.clone() {
            StatUpdate::Position(v) => def.position = v,
            StatUpdate::Name(s) => def.name = s,
            StatUpdate::Scale(v) => def.scale = v,
            StatUpdate::Text(s) => def.text = s,
            StatUpdate::Number(n) => def.number = n,
            StatUpdate::Item(n) => def.item = n,
            StatUpdate::Direction(d) => def.direction = d,
            StatUpdate::Alignment(v) => def.alignment = v,
            StatUpdate::Offset(v) => def.offset = v,
            StatUpdate::WorldPosition(p) => def.world_position = p,
            StatUpdate::Size(s) => def.size = s,
        }
        def
    }

    #[test]
    fn test_apply_matches_field_table() {
        let kinds = [
            HudElementKind::Image,
            HudElementKind::Text,
            HudElementKind::StatBar,
            HudElementKind::Inventory,
            HudElementKind::Waypoint,
        ];
        for kind in kinds {
            for stat in HudStat::ALL {
                let update = sample_update(stat);
                let mut element = HudElement::from(HudElementDef::new(kind));
                let before = element.clone();

                let applied = element.apply(update.clone());
                assert_eq!(applied, kind.accepts(stat), "{:?} / {:?}", kind, stat);
                assert_eq!(element.kind(), kind);
                // only the targeted field moved, or nothing did
                assert_eq!(
                    element,
                    HudElement::from(def_with(kind, &update)),
                    "{:?} / {:?}",
                    kind,
                    stat
                );
                assert_eq!(element != before, applied, "{:?} / {:?}", kind, stat);
            }
        }
    }

    #[test]
    fn test_decode_checks_shape() {
        assert_eq!(
            StatUpdate::decode(HudStat::Text, &json!("World")).unwrap(),
            StatUpdate::Text("World".to_string())
        );
        assert_eq!(
            StatUpdate::decode(HudStat::Position, &json!([0.25, 0.75])).unwrap(),
            StatUpdate::Position(Vec2::new(0.25, 0.75))
        );
        assert_eq!(
            StatUpdate::decode(HudStat::Direction, &json!(2)).unwrap(),
            StatUpdate::Direction(HudDirection::TopBottom)
        );
        assert_eq!(
            StatUpdate::decode(HudStat::Direction, &json!("right_left")).unwrap(),
            StatUpdate::Direction(HudDirection::RightLeft)
        );
        assert!(matches!(
            StatUpdate::decode(HudStat::Number, &json!("ten")),
            Err(HudError::InvalidStat { stat: HudStat::Number, .. })
        ));
        assert!(StatUpdate::decode(HudStat::Size, &json!([1.5, 2.0])).is_err());
    }

    #[test]
    fn test_decode_direction_out_of_u32_range() {
        // 2^32 + 1 would wrap to right-to-left if truncated
        assert_eq!(
            StatUpdate::decode(HudStat::Direction, &json!(4_294_967_297u64)).unwrap(),
            StatUpdate::Direction(HudDirection::LeftRight)
        );
        assert_eq!(
            StatUpdate::decode(HudStat::Direction, &json!(u64::MAX)).unwrap(),
            StatUpdate::Direction(HudDirection::LeftRight)
        );
        assert_eq!(
            StatUpdate::decode(HudStat::Direction, &json!(3)).unwrap(),
            StatUpdate::Direction(HudDirection::BottomTop)
        );
    }

    #[test]
    fn test_def_deserializes_with_defaults() {
        let def: HudElementDef =
            serde_json::from_value(json!({"kind": "text", "position": [0.5, 0.9], "text": "Hello"}))
                .unwrap();
        assert_eq!(def.kind, HudElementKind::Text);
        assert_eq!(def.text, "Hello");
        assert_eq!(def.size, IVec2::ZERO);
        assert_eq!(def.direction, HudDirection::LeftRight);
    }
}
