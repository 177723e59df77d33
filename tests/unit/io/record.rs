//! Tests for the run record written beside each output

#[cfg(test)]
mod tests {
    use blockforget::io::record::{RunRecord, record_path};
    use blockforget::markov::GenerationStats;
    use blockforget::spatial::Arrangement;
    use std::path::Path;

    fn sample_record() -> RunRecord {
        RunRecord {
            block_size: 5,
            arrangement: Arrangement::ColumnZigzag,
            order: 3,
            seed: 42,
            stats: GenerationStats {
                generated: 16,
                fallbacks: 2,
                restarts: 1,
            },
            exhausted: false,
        }
    }

    // Tests the record path appends the log extension to the full name
    // Verified by replacing the existing extension
    #[test]
    fn test_record_path() {
        assert_eq!(
            record_path(Path::new("out/forgotten_cat.png")),
            Path::new("out/forgotten_cat.png.log")
        );
    }

    // Tests every parameter appears on its own line
    // Verified by omitting the arrangement line
    #[test]
    fn test_record_lines() {
        let text = sample_record().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first(), Some(&"block_size: 5"));
        assert!(lines.contains(&"arrangement: column-zigzag"));
        assert!(lines.contains(&"order: 3"));
        assert!(lines.contains(&"seed: 42"));
        assert!(lines.contains(&"fallbacks: 2"));
        assert!(lines.contains(&"exhausted: false"));
    }

    // Tests the record is written next to the output file
    // Verified by writing into the working directory
    #[test]
    fn test_write_beside() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("temporary directory available");
        };
        let output = dir.path().join("forgotten_a.png");

        let Ok(written) = sample_record().write_beside(&output) else {
            unreachable!("record should be writable");
        };
        assert_eq!(written, record_path(&output));

        let Ok(contents) = std::fs::read_to_string(&written) else {
            unreachable!("record was just written");
        };
        assert_eq!(contents, sample_record().to_string());
    }
}
