//! Reading and writing of configuration files.

use anyhow::{Context, bail};
use std::{
    fs::{self, File},
    io::{self, BufReader, Read, Write},
    path::Path,
};

/// Creates the file at the given path, as well as any missing parent
/// directories.
pub fn create_file_and_required_directories(file_path: impl AsRef<Path>) -> io::Result<File> {
    let file_path = file_path.as_ref();
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(file_path)
}

/// Fails if a file already exists at the given path, unless
/// `force_overwrite` is set.
pub fn ensure_file_writable(
    file_path: impl AsRef<Path>,
    force_overwrite: bool,
) -> anyhow::Result<()> {
    let file_path = file_path.as_ref();
    if !force_overwrite && file_path.exists() {
        bail!("File {} already exists", file_path.display());
    }
    Ok(())
}

/// Reads and returns the content of the specified text file.
pub fn read_text_file(file_path: impl AsRef<Path>) -> io::Result<String> {
    let file = File::open(file_path)?;
    let mut text = String::new();
    BufReader::new(file).read_to_string(&mut text)?;
    Ok(text)
}

/// Writes the given string as a text file with the specified path, replacing
/// any existing file.
pub fn write_text_file(text: &str, output_file_path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = create_file_and_required_directories(output_file_path)?;
    file.write_all(text.as_bytes())
}

/// Reads the RON (Rusty Object Notation) file at the given path and
/// deserializes the contents into an object of type `T`.
pub fn parse_ron_file<T>(file_path: impl AsRef<Path>) -> anyhow::Result<T>
where
    T: for<'de> serde::de::Deserialize<'de>,
{
    let file_path = file_path.as_ref();
    log::debug!("Parsing RON file {}", file_path.display());

    let text = read_text_file(file_path)
        .with_context(|| format!("Could not open {}", file_path.display()))?;

    ron::from_str::<T>(&text).with_context(|| format!("Invalid syntax in {}", file_path.display()))
}

/// Serializes the given value of type `T` to RON (Rusty Object Notation)
/// and writes it to the given path.
pub fn write_ron_file<T>(value: &T, output_file_path: impl AsRef<Path>) -> anyhow::Result<()>
where
    T: serde::ser::Serialize,
{
    let output_file_path = output_file_path.as_ref();

    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .context("Could not serialize value to RON")?;

    write_text_file(&text, output_file_path)
        .with_context(|| format!("Could not write {}", output_file_path.display()))
}
