//! Tests for command-line parsing and end-to-end generation runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::{Path, PathBuf};
    use wavetile::CollapseError;
    use wavetile::algorithm::executor::CollapseMode;
    use wavetile::io::cli::{Cli, Runner};
    use wavetile::io::configuration::{DEFAULT_ATTEMPTS, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_SEED};

    /// Write a rule file with one 2x2 image per entry of `tiles`
    fn write_rules(dir: &Path, tiles: &[(&str, [i32; 4])]) -> PathBuf {
        let mut entries = Vec::new();
        for (index, (name, [top, right, bottom, left])) in tiles.iter().enumerate() {
            let shade = u8::try_from(index * 60).unwrap_or(u8::MAX);
            RgbaImage::from_pixel(2, 2, Rgba([shade, 100, 50, 255]))
                .save(dir.join(format!("{name}.png")))
                .unwrap();
            entries.push(format!(
                r#"{{ "Img": "{name}.png", "Width": 2, "Height": 2,
                     "Rotations": [{{ "RotationDegree": 0,
                                      "SideRules": [[{top}], [{right}], [{bottom}], [{left}]] }}] }}"#
            ));
        }

        let rules = dir.join("rules.json");
        fs::write(&rules, format!("[{}]", entries.join(","))).unwrap();
        rules
    }

    fn cli(rules: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["wavetile".to_string(), rules.display().to_string()];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the rule file
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["wavetile", "rules.json"]);

        assert_eq!(cli.rules, PathBuf::from("rules.json"));
        assert_eq!((cli.rows, cli.cols), (DEFAULT_ROWS, DEFAULT_COLS));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.attempts, DEFAULT_ATTEMPTS);
        assert_eq!(cli.mode(), CollapseMode::Eager);
        assert!(!cli.visualize);
        assert!(cli.should_show_progress());
        assert_eq!(cli.start(), (DEFAULT_ROWS / 2, DEFAULT_COLS / 2));
    }

    // Tests every flag, short and long
    // Verified by swapping the -x and -y short flags
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "wavetile",
            "rules.json",
            "-x",
            "6",
            "-y",
            "9",
            "-s",
            "123",
            "-p",
            "--start-row",
            "1",
            "--start-col",
            "2",
            "-a",
            "5",
            "-v",
            "-o",
            "out/board.png",
            "-q",
        ]);

        assert_eq!((cli.rows, cli.cols), (6, 9));
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.mode(), CollapseMode::Propagating);
        assert_eq!(cli.start(), (1, 2));
        assert_eq!(cli.attempts, 5);
        assert!(cli.visualize);
        assert!(!cli.should_show_progress());

        let config = cli.engine_config(7);
        assert_eq!((config.rows, config.cols, config.seed), (6, 9, 7));
        assert_eq!(config.mode, CollapseMode::Propagating);
    }

    // Tests verbosity flags map onto log filters and quiet wins
    // Verified by ignoring the quiet flag in log_filter
    #[test]
    fn test_log_filter() {
        let filter = |args: &[&str]| {
            let mut full = vec!["wavetile", "rules.json"];
            full.extend_from_slice(args);
            Cli::parse_from(full).log_filter()
        };

        assert_eq!(filter(&[]), "warn");
        assert_eq!(filter(&["--verbose"]), "info");
        assert_eq!(filter(&["--verbose", "--verbose"]), "debug");
        assert_eq!(filter(&["--verbose", "--verbose", "--verbose"]), "trace");
        assert_eq!(filter(&["--verbose", "--quiet"]), "error");
    }

    // Tests output names derive from the rule file unless given
    // Verified by changing output suffix to verify path generation
    #[test]
    fn test_output_paths() {
        let default = Cli::parse_from(["wavetile", "maps/roads.json"]);
        assert_eq!(default.output_path(), PathBuf::from("maps/roads_result.png"));
        assert_eq!(
            default.visualization_path(),
            PathBuf::from("maps/roads_result_visualization.gif")
        );

        let explicit = Cli::parse_from(["wavetile", "roads.json", "-o", "out/board.png"]);
        assert_eq!(explicit.output_path(), PathBuf::from("out/board.png"));
        assert_eq!(
            explicit.visualization_path(),
            PathBuf::from("out/board_visualization.gif")
        );
    }

    // A compatible catalog renders the whole board next to the rule file
    // Verified by exporting before the wave runs
    #[test]
    fn test_run_writes_board() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules = write_rules(temp_dir.path(), &[("plain", [0, 0, 0, 0])]);

        let summary = Runner::new(cli(&rules, &["-x", "3", "-y", "4", "-q"]))
            .run()
            .unwrap();

        assert_eq!(summary.cells, 12);
        assert_eq!(summary.attempts, 1);
        assert_eq!(summary.seed, DEFAULT_SEED);
        assert_eq!(summary.output, temp_dir.path().join("rules_result.png"));

        let board = image::open(&summary.output).unwrap().to_rgba8();
        assert_eq!(board.dimensions(), (8, 6));
        assert!(board.pixels().all(|pixel| pixel.0[3] == 255));
    }

    // Visualized runs write the board and an animation
    // Verified by skipping the GIF export in visualize mode
    #[test]
    fn test_run_with_visualization() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules = write_rules(temp_dir.path(), &[
            ("a", [0, 1, 0, 1]),
            ("b", [0, 1, 0, 1]),
        ]);
        let output = temp_dir.path().join("out").join("board.png");

        let summary = Runner::new(cli(&rules, &[
            "-x",
            "2",
            "-y",
            "2",
            "-p",
            "-v",
            "-q",
            "-o",
            output.to_str().unwrap(),
        ]))
        .run()
        .unwrap();

        assert_eq!(summary.output, output);
        assert!(output.exists());
        assert!(temp_dir.path().join("out").join("board_visualization.gif").exists());
    }

    // Runs that exhaust on every attempt report the exhaustion
    // Verified by returning Ok after the last failed attempt
    #[test]
    fn test_run_exhausts_after_attempts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules = write_rules(temp_dir.path(), &[("p", [1, 1, 1, 2]), ("q", [3, 3, 3, 4])]);

        let error = Runner::new(cli(&rules, &["-x", "1", "-y", "2", "-a", "3", "-q"]))
            .run()
            .unwrap_err();

        assert!(matches!(error, CollapseError::Exhausted { x: 0, y: 0 }));
        assert!(!temp_dir.path().join("rules_result.png").exists());
    }

    // Configuration errors are not retried
    // Verified by retrying every error kind
    #[test]
    fn test_run_rejects_invalid_grid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules = write_rules(temp_dir.path(), &[("plain", [0, 0, 0, 0])]);

        let error = Runner::new(cli(&rules, &["-x", "0", "-a", "4", "-q"]))
            .run()
            .unwrap_err();
        assert!(matches!(
            error,
            CollapseError::InvalidParameter { parameter: "rows", .. }
        ));
    }

    // Start cells outside the grid are rejected before anything is rendered
    // Verified by passing the unchecked start cell to the wave
    #[test]
    fn test_run_rejects_start_outside_grid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules = write_rules(temp_dir.path(), &[("plain", [0, 0, 0, 0])]);

        let row = Runner::new(cli(&rules, &["-x", "4", "-y", "4", "--start-row", "99", "-q"]))
            .run()
            .unwrap_err();
        assert!(matches!(
            row,
            CollapseError::InvalidParameter { parameter: "start_row", .. }
        ));

        let col = Runner::new(cli(&rules, &["-x", "4", "-y", "4", "--start-col", "4", "-q"]))
            .run()
            .unwrap_err();
        assert!(matches!(
            col,
            CollapseError::InvalidParameter { parameter: "start_col", .. }
        ));

        assert!(!temp_dir.path().join("rules_result.png").exists());
    }

    // The last row and column are valid start cells
    // Verified by comparing with <= instead of <
    #[test]
    fn test_checked_start_bounds() {
        let edge = Cli::parse_from([
            "wavetile",
            "rules.json",
            "-x",
            "3",
            "-y",
            "5",
            "--start-row",
            "2",
            "--start-col",
            "4",
        ]);
        assert_eq!(edge.checked_start().unwrap(), (2, 4));

        let centre = Cli::parse_from(["wavetile", "rules.json", "-x", "3", "-y", "5"]);
        assert_eq!(centre.checked_start().unwrap(), (1, 2));

        let empty = Cli::parse_from(["wavetile", "rules.json", "-x", "0"]);
        assert!(matches!(
            empty.checked_start(),
            Err(CollapseError::InvalidParameter { parameter: "rows", .. })
        ));
    }

    // Boards too large to render fail instead of allocating
    #[test]
    fn test_run_rejects_oversized_canvas() {
        let temp_dir = tempfile::tempdir().unwrap();
        let rules = write_rules(temp_dir.path(), &[("plain", [0, 0, 0, 0])]);

        let error = Runner::new(cli(&rules, &["-x", "10000", "-y", "10000", "-q"]))
            .run()
            .unwrap_err();
        assert!(matches!(
            error,
            CollapseError::InvalidParameter { parameter: "canvas", .. }
        ));
    }

    // Missing and malformed rule files fail before any run
    #[test]
    fn test_run_with_bad_rules() {
        let temp_dir = tempfile::tempdir().unwrap();

        let missing = Runner::new(cli(&temp_dir.path().join("absent.json"), &["-q"])).run();
        assert!(matches!(missing, Err(CollapseError::FileSystem { .. })));

        let broken = temp_dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let parsed = Runner::new(cli(&broken, &["-q"])).run();
        assert!(matches!(parsed, Err(CollapseError::CatalogParse { .. })));
    }
}
