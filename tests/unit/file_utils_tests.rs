/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use vidcatalog::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    // A directory is not a file
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists distinguishes directories from files
#[test]
fn test_dir_exists_withFileAndDir_shouldOnlyAcceptDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "plain.txt", "x")?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&file));

    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParents_shouldCreateThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("a").join("b").join("page.rst");

    FileManager::write_to_file(&target, "content")?;

    assert_eq!(FileManager::read_to_string(&target)?, "content");
    Ok(())
}

/// Test that clear_dir removes files and nested directories
#[test]
fn test_clear_dir_withNestedContent_shouldLeaveEmptyDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().join("videos");
    common::create_test_file(&root, "stale.rst", "old")?;
    common::create_test_file(&root, "2015-x/old.rst", "old")?;

    let removed = FileManager::clear_dir(&root)?;

    assert_eq!(removed, vec![root.join("2015-x"), root.join("stale.rst")]);
    assert!(FileManager::dir_exists(&root));
    assert_eq!(fs::read_dir(&root)?.count(), 0);
    Ok(())
}

/// Test that clear_dir creates a missing directory
#[test]
fn test_clear_dir_withMissingDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().join("fresh");

    let removed = FileManager::clear_dir(&root)?;

    assert!(removed.is_empty());
    assert!(FileManager::dir_exists(&root));
    Ok(())
}

/// Test that find_files matches extensions case-insensitively, in name order
#[test]
fn test_find_files_withMixedExtensions_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.rst", "")?;
    common::create_test_file(temp_dir.path(), "a.RST", "")?;
    common::create_test_file(temp_dir.path(), "c.md", "")?;
    common::create_test_file(temp_dir.path(), "sub/d.rst", "")?;

    let files = FileManager::find_files(temp_dir.path(), "rst")?;
    let names: Vec<String> = files
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.RST", "b.rst", "d.rst"]);
    Ok(())
}
