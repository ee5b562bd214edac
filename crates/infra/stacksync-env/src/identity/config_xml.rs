//! Reads the device name out of the persisted configuration document.
//!
//! Only `<root>/device/name` is interpreted; the rest of the document belongs
//! to the configuration loader and is skipped.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String), // quick-xml errors not always stable types; wrap as string
}

impl From<quick_xml::Error> for ConfigReadError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

const DEVICE_PATH: [&str; 2] = ["device", "name"];

pub fn read_device_name(path: &Path) -> Result<Option<String>, ConfigReadError> {
    let content = std::fs::read_to_string(path)?;
    parse_device_name(&content)
}

/// Text of the first `device/name` element under the document root.
///
/// The whole document is read; a value is only returned if it is well formed.
pub fn parse_device_name(xml: &str) -> Result<Option<String>, ConfigReadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    // Element names below the root element.
    let mut stack: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut current: Option<String> = None;
    let mut found: Option<String> = None;

    loop {
        let event = reader.read_event()?;
        if root_closed
            && matches!(
                event,
                Event::Start(_) | Event::Empty(_) | Event::Text(_) | Event::CData(_)
            )
        {
            return Err(ConfigReadError::Xml("content after the root element".into()));
        }
        match event {
            Event::Start(e) => {
                if depth > 0 {
                    stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Event::End(_) => {
                if stack == DEVICE_PATH && found.is_none() {
                    found = current.take();
                }
                stack.pop();
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            Event::Empty(_) if depth == 0 => root_closed = true,
            Event::Text(t) if stack == DEVICE_PATH && found.is_none() => {
                let text = t.unescape()?;
                current.get_or_insert_with(String::new).push_str(&text);
            }
            Event::CData(t) if stack == DEVICE_PATH && found.is_none() => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                current.get_or_insert_with(String::new).push_str(&text);
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(ConfigReadError::Xml("unexpected end of document".into()));
                }
                return Ok(found);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_device_name() {
        let xml = r#"<?xml version="1.0"?>
            <config>
              <profiles><profile><name>work</name></profile></profiles>
              <device>
                <name>mydevice</name>
              </device>
            </config>"#;
        assert_eq!(parse_device_name(xml).unwrap(), Some("mydevice".into()));
    }

    #[test]
    fn test_unescapes_entities() {
        let xml = "<config><device><name>a&amp;b</name></device></config>";
        assert_eq!(parse_device_name(xml).unwrap(), Some("a&b".into()));
    }

    #[test]
    fn test_missing_or_empty_name() {
        assert_eq!(parse_device_name("<config/>").unwrap(), None);
        assert_eq!(
            parse_device_name("<config><device></device></config>").unwrap(),
            None
        );
        assert_eq!(
            parse_device_name("<config><device><name/></device></config>").unwrap(),
            None
        );
        // A name that is not directly under <device> does not count.
        assert_eq!(
            parse_device_name("<config><name>x</name><other><name>y</name></other></config>")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(parse_device_name("<config><device><name>x</device>").is_err());
    }

    #[test]
    fn test_name_in_otherwise_broken_document_is_rejected() {
        for xml in [
            "<config><device><name>x</name></device>",
            "<config><device><name>x</name></device></config><junk",
            "<config><device><name>x</name></device></config><extra/>",
            "<config><device><name>x</name><bad></device></config>",
        ] {
            assert!(parse_device_name(xml).is_err(), "{xml}");
        }
    }

    #[test]
    fn test_first_name_wins() {
        let xml = "<config><device><name>a</name><name>b</name></device></config>";
        assert_eq!(parse_device_name(xml).unwrap(), Some("a".into()));
    }

    #[test]
    fn test_read_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.xml");
        std::fs::write(&path, "<config><device><name>laptop</name></device></config>").unwrap();
        assert_eq!(read_device_name(&path).unwrap(), Some("laptop".into()));

        assert!(matches!(
            read_device_name(&temp.path().join("absent.xml")),
            Err(ConfigReadError::Io(_))
        ));
    }
}
