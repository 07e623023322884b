//! Plain-text username lists: one name per line, each line newline-terminated.

use crate::error::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_list<P: AsRef<Path>, S: AsRef<str>>(path: P, usernames: &[S]) -> Result<()> {
    let file = fs::File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for username in usernames {
        writeln!(writer, "{}", username.as_ref())?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("unfollowers.txt");

        write_list(&path, &["alice", "bob"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alice\nbob\n");
    }

    #[test]
    fn test_empty_list_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");

        write_list::<_, String>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("list.txt");
        fs::write(&path, "old\nentries\nhere\n").unwrap();

        write_list(&path, &["carol".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "carol\n");
    }
}
