//! Derives the course ID from the `course.xml` packed inside an archive.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::domain::taxonomy::COURSE_XML;
use crate::domain::{AppError, CourseDescriptor, CourseId};

/// `true` for `<dir>/course.xml` with exactly one level of nesting.
fn is_top_level_descriptor(member: &str) -> bool {
    match member.split_once('/') {
        Some((dir, rest)) => !dir.is_empty() && rest == COURSE_XML,
        None => false,
    }
}

/// Read the course ID (`course-v1:{org}+{course}+{url_name}`) of a course archive.
pub fn course_id_from_archive(archive: &Path) -> Result<CourseId, AppError> {
    let display = archive.display().to_string();
    let unreadable = |details: String| AppError::CourseIdUnreadable { archive: display.clone(), details };

    let file = File::open(archive).map_err(|e| unreadable(e.to_string()))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    let mut descriptors = Vec::new();
    for entry in tar.entries().map_err(|e| unreadable(e.to_string()))? {
        let mut entry = entry.map_err(|e| unreadable(e.to_string()))?;
        let member = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        if !is_top_level_descriptor(&member) {
            continue;
        }
        let mut content = String::new();
        entry.read_to_string(&mut content).map_err(|e| unreadable(e.to_string()))?;
        tracing::debug!(member = %member, "found course descriptor");
        descriptors.push(content);
    }

    let xml = match descriptors.as_slice() {
        [] => return Err(AppError::CourseXmlNotFound { archive: display.clone() }),
        [only] => only,
        _ => return Err(AppError::AmbiguousCourseXml { archive: display.clone() }),
    };

    let descriptor = CourseDescriptor::from_xml(xml).map_err(|e| unreadable(e.to_string()))?;
    Ok(descriptor.course_id())
}
