//! Parser for catalog data files.
//!
//! Both files are `::`-delimited UTF-8 text, one record per line:
//! - movies.dat: movieId::title::tags (tags optional)
//! - browse.dat: movieId::title
//!
//! Blank lines are skipped. Line numbers in errors are 1-based.

use crate::error::{DataLoadError, Result};
use crate::types::{BrowseEntry, Movie, MovieId};
use std::io::ErrorKind;
use std::path::Path;

/// Reads a whole file into lines, mapping a missing file to `FileNotFound`
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parse_movie_id(raw: &str, file: &str, line: usize) -> Result<MovieId> {
    raw.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid movieId: {}", e),
    })
}

fn parse_title(raw: Option<&str>, file: &str, line: usize) -> Result<String> {
    let title = raw.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: "Missing title".to_string(),
        });
    }
    Ok(title.to_string())
}

/// Parse the movies.dat file
///
/// Row order is preserved: the n-th non-blank line becomes position n.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines(path)?;
    let file = file_label(path);
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        // Tags are free text and may themselves contain the delimiter
        let mut parts = line_trimmed.splitn(3, "::");

        let movie_id = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: "Missing movieId".to_string(),
        })?;
        let id = parse_movie_id(movie_id, &file, line_no)?;
        let title = parse_title(parts.next(), &file, line_no)?;
        let tags = parts.next().unwrap_or_default().trim().to_string();

        movies.push(Movie {
            id,
            title,
            position: movies.len(),
            tags,
        });
    }

    Ok(movies)
}

/// Parse the browse.dat file
pub fn parse_browse(path: &Path) -> Result<Vec<BrowseEntry>> {
    let lines = read_lines(path)?;
    let file = file_label(path);
    let mut entries = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.splitn(2, "::");

        let movie_id = parts.next().ok_or_else(|| DataLoadError::ParseError {
            file: file.clone(),
            line: line_no,
            reason: "Missing movieId".to_string(),
        })?;

        entries.push(BrowseEntry {
            id: parse_movie_id(movie_id, &file, line_no)?,
            title: parse_title(parts.next(), &file, line_no)?,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_movies_keeps_order_and_tags() {
        let file = write_file(
            "19995::Avatar::action adventure sciencefiction\n\n285::Pirates of the Caribbean: At World's End::\n206647::Spectre\n",
        );

        let movies = parse_movies(file.path()).unwrap();

        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].id, 19995);
        assert_eq!(movies[0].tags, "action adventure sciencefiction");
        assert_eq!(movies[1].title, "Pirates of the Caribbean: At World's End");
        assert_eq!(movies[1].tags, "");
        assert_eq!(movies[2].position, 2);
        assert_eq!(movies[2].tags, "");
    }

    #[test]
    fn test_parse_movies_tags_may_contain_delimiter() {
        let file = write_file("1::Title::a::b\n");
        let movies = parse_movies(file.path()).unwrap();
        assert_eq!(movies[0].tags, "a::b");
    }

    #[test]
    fn test_parse_movies_reports_line_number() {
        let file = write_file("1::Good\n\nabc::Bad Id\n");

        match parse_movies(file.path()) {
            Err(DataLoadError::ParseError { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("movieId"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_browse_missing_title() {
        let file = write_file("12::\n");
        assert!(matches!(
            parse_browse(file.path()),
            Err(DataLoadError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_browse(Path::new("/definitely/not/here/browse.dat"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
