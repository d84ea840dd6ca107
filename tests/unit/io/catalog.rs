//! Tests for rule parsing and catalog construction

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use wavetile::CollapseError;
    use wavetile::io::catalog::{
        Rotation, RotationRule, TileImage, TileRule, build_catalog, load_catalog, parse_rules,
    };
    use wavetile::spatial::orientation::Orientation;

    const ROAD_RULES: &str = r#"[
        {
            "Img": "road.png",
            "Width": 32,
            "Height": 24,
            "Rotations": [
                { "RotationDegree": 0, "SideRules": [[0, 1], [1, 1], [0, 1], [1, 0]] },
                { "RotationDegree": 90, "SideRules": [[1, 0], [0, 1], [1, 1], [0, 1]] }
            ]
        },
        {
            "Img": "grass.png",
            "Width": 32,
            "Height": 32,
            "Rotations": [
                { "RotationDegree": 0, "SideRules": [[0, 0], [0, 0], [0, 0], [0, 0]] }
            ]
        }
    ]"#;

    fn single_rule(degrees: i32, side_rules: &str) -> Vec<TileRule> {
        let json = format!(
            r#"[{{ "Img": "t.png", "Width": 8, "Height": 8,
                 "Rotations": [{{ "RotationDegree": {degrees}, "SideRules": {side_rules} }}] }}]"#
        );
        parse_rules(&json, Path::new("inline.json")).unwrap()
    }

    // PascalCase keys map onto the rule fields
    // Verified by dropping the rename_all attribute
    #[test]
    fn test_parse_rules() {
        let rules = parse_rules(ROAD_RULES, Path::new("rules.json")).unwrap();

        assert_eq!(rules.len(), 2);
        let road = rules.first().unwrap();
        assert_eq!(road.img, PathBuf::from("road.png"));
        assert_eq!((road.width, road.height), (32, 24));
        assert_eq!(road.rotations.len(), 2);
        assert_eq!(road.rotations.get(1).unwrap().rotation_degree, 90);
    }

    // Rule records are read-only views of the rule text: each one deserializes on its
    // own and lowercase keys are missing fields
    // Verified by switching rename_all to snake_case
    #[test]
    fn test_rule_records_deserialize() {
        let rotation: RotationRule =
            serde_json::from_str(r#"{ "RotationDegree": 180, "SideRules": [[1], [2], [3], [4]] }"#)
                .unwrap();
        assert_eq!(rotation.rotation_degree, 180);
        assert_eq!(rotation.side_rules, vec![vec![1], vec![2], vec![3], vec![4]]);

        let rule: TileRule = serde_json::from_str(
            r#"{ "Img": "a.png", "Width": 4, "Height": 6, "Rotations": [] }"#,
        )
        .unwrap();
        assert_eq!((rule.img, rule.width, rule.height), (PathBuf::from("a.png"), 4, 6));

        let lowercase = serde_json::from_str::<TileRule>(
            r#"{ "img": "a.png", "width": 4, "height": 6, "rotations": [] }"#,
        );
        assert!(lowercase.is_err());
    }

    // Malformed rule text is reported with its path
    // Verified by mapping parse errors to InvalidParameter
    #[test]
    fn test_parse_rules_rejects_bad_json() {
        let error = parse_rules("[{\"Img\": 3}]", Path::new("broken.json")).unwrap_err();
        assert!(matches!(
            error,
            CollapseError::CatalogParse { ref path, .. } if path == Path::new("broken.json")
        ));
    }

    // Every rotation becomes one tile, in file order, with paths under the base directory
    // Verified by building one tile per rule instead of per rotation
    #[test]
    fn test_build_catalog_one_tile_per_rotation() {
        let rules = parse_rules(ROAD_RULES, Path::new("rules.json")).unwrap();
        let catalog = build_catalog(&rules, Path::new("assets")).unwrap();

        assert_eq!(catalog.len(), 3);
        let rotated = catalog.get(1).unwrap();
        assert_eq!(rotated.value(), &TileImage {
            path: PathBuf::from("assets/road.png"),
            width: 32,
            height: 24,
            rotation: Rotation::Quarter,
        });
        assert_eq!(rotated.socket(Orientation::Top), &[1, 0]);
        assert_eq!(rotated.socket(Orientation::Left), &[0, 1]);

        let grass = catalog.get(2).unwrap();
        assert_eq!(grass.value().path, PathBuf::from("assets/grass.png"));
        assert_eq!(grass.value().rotation, Rotation::None);
    }

    // Short side lists name the first missing side
    // Verified by padding missing sides with empty codes
    #[test]
    fn test_missing_side_rules() {
        let rules = single_rule(0, "[[1], [2], [3]]");
        let error = build_catalog(&rules, Path::new("")).unwrap_err();

        assert!(matches!(
            error,
            CollapseError::MissingSocket {
                orientation: Orientation::Left
            }
        ));
    }

    // Extra side rules are rejected
    // Verified by silently truncating to four sides
    #[test]
    fn test_extra_side_rules() {
        let rules = single_rule(0, "[[1], [2], [3], [4], [5]]");
        let error = build_catalog(&rules, Path::new("")).unwrap_err();

        assert!(matches!(
            error,
            CollapseError::InvalidParameter {
                parameter: "SideRules",
                ..
            }
        ));
    }

    // Only quarter turns are accepted, normalized into 0..360
    // Verified by matching degrees without rem_euclid
    #[test]
    fn test_rotation_parsing() {
        assert_eq!(Rotation::try_from(0).unwrap(), Rotation::None);
        assert_eq!(Rotation::try_from(180).unwrap(), Rotation::Half);
        assert_eq!(Rotation::try_from(-90).unwrap(), Rotation::ThreeQuarter);
        assert_eq!(Rotation::try_from(450).unwrap(), Rotation::Quarter);
        assert!(matches!(
            Rotation::try_from(45),
            Err(CollapseError::InvalidRotation { degrees: 45 })
        ));

        let rules = single_rule(30, "[[1], [1], [1], [1]]");
        assert!(build_catalog(&rules, Path::new("")).is_err());
    }

    // Rule files are read from disk and resolved against their own directory
    // Verified by resolving image paths against the working directory
    #[test]
    fn test_load_catalog_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules_path = temp_dir.path().join("rules.json");
        std::fs::write(&rules_path, ROAD_RULES).unwrap();

        let catalog = load_catalog(&rules_path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.first().unwrap().value().path,
            temp_dir.path().join("road.png")
        );
    }

    // Missing rule files are file system errors
    #[test]
    fn test_load_catalog_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let error = load_catalog(&temp_dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(
            error,
            CollapseError::FileSystem {
                operation: "read rules",
                ..
            }
        ));
    }

    #[test]
    fn test_tile_image_display() {
        let payload = TileImage {
            path: PathBuf::from("road.png"),
            width: 8,
            height: 8,
            rotation: Rotation::Half,
        };
        assert_eq!(payload.to_string(), "img: road.png | rotation: 180");
        assert_eq!(Rotation::ThreeQuarter.degrees(), 270);
    }
}
