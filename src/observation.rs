use crate::grid::Pos;
use serde::Deserialize;

/// One tick's view of the cave, read as a single JSON line. Everything but
/// `bot` may be absent and defaults to empty.
#[derive(Clone, Debug, Deserialize)]
pub struct Observation {
    pub bot: Pos,
    #[serde(default)]
    pub wall: Vec<Pos>,
    #[serde(default)]
    pub floor: Vec<Pos>,
    #[serde(default)]
    pub visible_gems: Vec<Gem>,
    /// Present on the first record only; feeds the startup notice and
    /// nothing else.
    #[serde(default)]
    pub config: Option<MapConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Gem {
    pub position: Pos,
    pub ttl: i64,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_parses() {
        let line = r#"{"bot":[2,3],"wall":[[0,0],[1,0]],"floor":[[2,2]],"visible_gems":[{"position":[5,5],"ttl":7}],"config":{"width":40,"height":30}}"#;
        let obs: Observation = serde_json::from_str(line).unwrap();
        assert_eq!(obs.bot, (2, 3));
        assert_eq!(obs.wall, vec![(0, 0), (1, 0)]);
        assert_eq!(obs.floor, vec![(2, 2)]);
        assert_eq!(obs.visible_gems.len(), 1);
        assert_eq!(obs.visible_gems[0].position, (5, 5));
        assert_eq!(obs.visible_gems[0].ttl, 7);
        assert_eq!(obs.config.unwrap().width, 40);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let obs: Observation = serde_json::from_str(r#"{"bot":[0,0]}"#).unwrap();
        assert!(obs.wall.is_empty());
        assert!(obs.floor.is_empty());
        assert!(obs.visible_gems.is_empty());
        assert!(obs.config.is_none());
    }

    #[test]
    fn missing_bot_is_an_error() {
        assert!(serde_json::from_str::<Observation>(r#"{"wall":[[1,1]]}"#).is_err());
    }
}
