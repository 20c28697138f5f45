use serde::Deserialize;

/// Horizontal text alignment inside a cell.
///
/// Theme files use the single-letter codes `L`, `C` and `R`; an empty string
/// means left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Align {
    #[default]
    #[serde(rename = "L", alias = "")]
    Left,
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "R")]
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_codes() {
        assert_eq!(serde_yaml::from_str::<Align>("C").unwrap(), Align::Center);
        assert_eq!(serde_yaml::from_str::<Align>("R").unwrap(), Align::Right);
        assert_eq!(serde_yaml::from_str::<Align>("''").unwrap(), Align::Left);
        assert!(serde_yaml::from_str::<Align>("J").is_err());
    }
}
