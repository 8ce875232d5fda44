//! Course descriptor (`course.xml` root attributes) and canonical course IDs.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Root element name of the course descriptor.
const COURSE_ELEMENT: &[u8] = b"course";

/// Canonical identifier of a course run: `course-v1:{org}+{course}+{run}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseId(String);

impl CourseId {
    /// Wrap an identifier supplied by the caller verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error reading the course descriptor document.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("course.xml has no root element")]
    MissingRoot,

    #[error("expected root element <course>, found <{0}>")]
    UnexpectedRoot(String),

    #[error("<course> is missing the '{0}' attribute")]
    MissingAttribute(&'static str),

    #[error("<{0}> is never closed")]
    UnclosedElement(String),

    #[error("unexpected second root element <{0}>")]
    ExtraRoot(String),
}

/// Organization, course number and run read from `course.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDescriptor {
    pub org: String,
    pub course: String,
    pub url_name: String,
}

impl CourseDescriptor {
    /// Parse the whole document and read the root `<course>` element's `org`,
    /// `course` and `url_name` attributes.
    pub fn from_xml(xml: &str) -> Result<Self, DescriptorError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut descriptor = None;
        let mut open: Vec<String> = Vec::new();
        loop {
            match reader.read_event()? {
                Event::Start(element) => {
                    if open.is_empty() {
                        descriptor = Some(Self::from_root(&element, descriptor.is_some())?);
                    }
                    open.push(element_name(&element));
                }
                Event::Empty(element) => {
                    if open.is_empty() {
                        descriptor = Some(Self::from_root(&element, descriptor.is_some())?);
                    }
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(name) = open.pop() {
            return Err(DescriptorError::UnclosedElement(name));
        }
        descriptor.ok_or(DescriptorError::MissingRoot)
    }

    fn from_root(element: &BytesStart<'_>, seen_root: bool) -> Result<Self, DescriptorError> {
        if seen_root {
            return Err(DescriptorError::ExtraRoot(element_name(element)));
        }
        if element.name().as_ref() != COURSE_ELEMENT {
            return Err(DescriptorError::UnexpectedRoot(element_name(element)));
        }

        let mut org = None;
        let mut course = None;
        let mut url_name = None;
        for attr in element.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let value = attr.unescape_value()?.into_owned();
            match attr.key.as_ref() {
                b"org" => org = Some(value),
                b"course" => course = Some(value),
                b"url_name" => url_name = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            org: org.ok_or(DescriptorError::MissingAttribute("org"))?,
            course: course.ok_or(DescriptorError::MissingAttribute("course"))?,
            url_name: url_name.ok_or(DescriptorError::MissingAttribute("url_name"))?,
        })
    }

    pub fn course_id(&self) -> CourseId {
        CourseId(format!("course-v1:{}+{}+{}", self.org, self.course, self.url_name))
    }
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}
