//! Build descriptor parsing.
//!
//! Reads the project coordinate, the `<parent>` coordinate and the direct
//! `<dependencies>` of a `pom.xml`. Elements elsewhere in the document
//! (dependency management, profiles, plugins) are ignored.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use super::types::{MavenCoordinate, MavenPom};
use crate::config::ToolConfig;
use crate::error::{Error, Result};

/// Coordinate fields as they appear in the document, before inheritance
/// and substitution.
#[derive(Debug, Default)]
struct RawCoordinate {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    kind: Option<String>,
    packaging: Option<String>,
}

impl RawCoordinate {
    fn append(&mut self, element: &str, text: &str) {
        let slot = match element {
            "groupId" => &mut self.group_id,
            "artifactId" => &mut self.artifact_id,
            "version" => &mut self.version,
            "scope" => &mut self.scope,
            "type" => &mut self.kind,
            "packaging" => &mut self.packaging,
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    /// `type` wins over `packaging`.
    fn declared_kind(&mut self) -> Option<String> {
        self.kind.take().or_else(|| self.packaging.take())
    }
}

#[derive(Debug, Default)]
struct RawPom {
    project: RawCoordinate,
    parent: Option<RawCoordinate>,
    dependencies: Vec<RawCoordinate>,
    open_dependency: Option<RawCoordinate>,
}

impl RawPom {
    fn open(&mut self, path: &[&str]) {
        match path {
            ["project", "parent"] => self.parent = Some(RawCoordinate::default()),
            ["project", "dependencies", "dependency"] => {
                self.open_dependency = Some(RawCoordinate::default())
            }
            _ => {}
        }
    }

    fn close(&mut self, path: &[&str]) {
        if let ["project", "dependencies", "dependency"] = path {
            if let Some(dependency) = self.open_dependency.take() {
                self.dependencies.push(dependency);
            }
        }
    }

    fn text(&mut self, path: &[&str], text: &str) {
        match path {
            ["project", element] => self.project.append(element, text),
            ["project", "parent", element] => {
                if let Some(parent) = self.parent.as_mut() {
                    parent.append(element, text);
                }
            }
            ["project", "dependencies", "dependency", element] => {
                if let Some(dependency) = self.open_dependency.as_mut() {
                    dependency.append(element, text);
                }
            }
            _ => {}
        }
    }
}

fn read_raw(xml: &str) -> std::result::Result<RawPom, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut raw = RawPom::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                raw.open(&as_path(&stack));
            }
            Event::End(_) => {
                raw.close(&as_path(&stack));
                stack.pop();
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                raw.text(&as_path(&stack), &text);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                raw.text(&as_path(&stack), &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(raw)
}

fn as_path(stack: &[String]) -> Vec<&str> {
    stack.iter().map(String::as_str).collect()
}

/// Parse the descriptor at `path`.
pub fn parse_pom(path: &Path, source_files: usize, config: &ToolConfig) -> Result<MavenPom> {
    let xml = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_pom_str(&xml, path, source_files, config)
}

/// Parse descriptor text. `path` is only used in error messages.
///
/// `source_files` is recorded on every coordinate of the result.
pub fn parse_pom_str(
    xml: &str,
    path: &Path,
    source_files: usize,
    config: &ToolConfig,
) -> Result<MavenPom> {
    let mut raw = read_raw(xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let required = |value: Option<String>, element: &'static str| {
        value.ok_or_else(|| Error::MissingElement {
            path: path.to_path_buf(),
            element,
        })
    };

    let parent = match raw.parent.take() {
        Some(mut p) => Some(MavenCoordinate {
            kind: p.declared_kind(),
            group_id: required(p.group_id, "groupId")?,
            artifact_id: required(p.artifact_id, "artifactId")?,
            version: p.version,
            scope: p.scope,
            source_files,
        }),
        None => None,
    };

    // Missing project fields are inherited from the parent.
    let mut project = raw.project;
    let inherited = |own: Option<String>, from_parent: fn(&MavenCoordinate) -> Option<String>| {
        own.or_else(|| parent.as_ref().and_then(from_parent))
    };
    let kind = project.declared_kind();
    let coordinate = MavenCoordinate {
        group_id: required(
            inherited(project.group_id, |p| Some(p.group_id.clone())),
            "groupId",
        )?,
        artifact_id: required(
            inherited(project.artifact_id, |p| Some(p.artifact_id.clone())),
            "artifactId",
        )?,
        version: inherited(project.version, |p| p.version.clone()),
        scope: project.scope,
        kind: Some(kind.unwrap_or_else(|| config.default_packaging.clone())),
        source_files,
    };

    let mut dependencies = Vec::with_capacity(raw.dependencies.len());
    for mut d in raw.dependencies {
        let expand = |value: String| substitute(&value, &coordinate, parent.as_ref());
        dependencies.push(MavenCoordinate {
            kind: d.declared_kind(),
            group_id: expand(required(d.group_id, "groupId")?),
            artifact_id: expand(required(d.artifact_id, "artifactId")?),
            version: d.version.map(expand),
            scope: d.scope,
            source_files,
        });
    }

    Ok(MavenPom {
        parent,
        coordinate,
        dependencies,
    })
}

/// Replace `${project.*}` and `${project.parent.*}` placeholders. Values that
/// are not known become empty.
fn substitute(value: &str, project: &MavenCoordinate, parent: Option<&MavenCoordinate>) -> String {
    if !value.contains("${") {
        return value.to_string();
    }
    let replacements = [
        ("${project.groupId}", project.group_id.as_str()),
        ("${project.artifactId}", project.artifact_id.as_str()),
        ("${project.version}", project.version.as_deref().unwrap_or("")),
        ("${project.parent.groupId}", parent.map_or("", |p| p.group_id.as_str())),
        ("${project.parent.artifactId}", parent.map_or("", |p| p.artifact_id.as_str())),
        (
            "${project.parent.version}",
            parent.and_then(|p| p.version.as_deref()).unwrap_or(""),
        ),
    ];
    replacements
        .iter()
        .fold(value.to_string(), |acc, (placeholder, with)| acc.replace(placeholder, with))
}
