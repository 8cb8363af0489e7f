//! The course catalog: courses, prerequisite references, and display cycles.
//!
//! Catalogs are immutable once loaded. Construction validates the invariants
//! eligibility depends on (unique ids, no dangling or self prerequisites, an
//! acyclic prerequisite relation); cycle membership is only advisory and is
//! reported by [`Catalog::audit`] instead of rejected.

use std::collections::BTreeMap;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{MallaError, Result};

pub type CourseId = u32;

/// A unit of the curriculum. `prereqs` must all be satisfied before the
/// course becomes eligible for completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(default)]
    pub prereqs: Vec<CourseId>,
}

/// Ordered display grouping of courses. Has no bearing on eligibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cycle {
    pub label: String,
    pub courses: Vec<CourseId>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    cycles: Vec<Cycle>,
    by_id: BTreeMap<CourseId, usize>,
}

/// On-disk catalog shape (TOML with `[[courses]]` and `[[cycles]]` tables).
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    cycles: Vec<Cycle>,
}

impl Catalog {
    /// Build a catalog, enforcing the invariants eligibility relies on.
    pub fn new(courses: Vec<Course>, cycles: Vec<Cycle>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for (index, course) in courses.iter().enumerate() {
            if by_id.insert(course.id, index).is_some() {
                return Err(MallaError::CatalogInvalid(format!(
                    "duplicate course id {}",
                    course.id
                )));
            }
        }

        for course in &courses {
            for &prereq in &course.prereqs {
                if prereq == course.id {
                    return Err(MallaError::CatalogInvalid(format!(
                        "course {} lists itself as a prerequisite",
                        course.id
                    )));
                }
                if !by_id.contains_key(&prereq) {
                    return Err(MallaError::CatalogInvalid(format!(
                        "course {} requires unknown course {prereq}",
                        course.id
                    )));
                }
            }
        }

        ensure_acyclic(&courses, &by_id)?;

        Ok(Self {
            courses,
            cycles,
            by_id,
        })
    }

    /// Load a catalog from a TOML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| MallaError::Config(format!("read catalog {}: {err}", path.display())))?;
        let file: CatalogFile = toml::from_str(&raw)
            .map_err(|err| MallaError::Config(format!("parse catalog {}: {err}", path.display())))?;
        Self::new(file.courses, file.cycles)
    }

    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.by_id.get(&id).map(|&index| &self.courses[index])
    }

    #[must_use]
    pub fn contains(&self, id: CourseId) -> bool {
        self.by_id.contains_key(&id)
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Report advisory issues: cycle membership is assumed by callers but not
    /// enforced at load time.
    #[must_use]
    pub fn audit(&self) -> Vec<CatalogIssue> {
        let mut memberships: BTreeMap<CourseId, usize> = BTreeMap::new();
        let mut issues = Vec::new();

        for cycle in &self.cycles {
            for &id in &cycle.courses {
                if self.by_id.contains_key(&id) {
                    *memberships.entry(id).or_insert(0) += 1;
                } else {
                    issues.push(CatalogIssue::UnknownCycleMember {
                        cycle: cycle.label.clone(),
                        id,
                    });
                }
            }
        }

        for course in &self.courses {
            match memberships.get(&course.id).copied().unwrap_or(0) {
                0 => issues.push(CatalogIssue::NotInAnyCycle(course.id)),
                1 => {}
                n => issues.push(CatalogIssue::InMultipleCycles(course.id, n)),
            }
        }

        issues
    }

    /// The built-in curriculum: 26 courses across five cycles.
    pub fn builtin() -> Result<Self> {
        let courses = vec![
            // Ciclo Básico 1°
            course(1, "Diseño I", &[]),
            course(2, "Lenguaje Proyectual I", &[]),
            course(3, "Pensamiento Contemporáneo I", &[]),
            course(4, "Tecnología Gral.", &[]),
            course(5, "Matemática", &[]),
            // Ciclo de Desarrollo 2°
            course(6, "Diseño II", &[1, 2]),
            course(7, "Lenguaje Proyectual II", &[1, 2]),
            course(8, "Pensamiento Contemporáneo II", &[1, 2]),
            course(9, "Tecnología I", &[1, 2]),
            course(10, "Física", &[5]),
            course(11, "Informática I", &[1, 2]),
            // Ciclo de Desarrollo 3°
            course(12, "Diseño III", &[4, 6, 7]),
            course(13, "Lenguaje Proyectual III", &[7]),
            course(14, "Pensamiento Contemporáneo III", &[3]),
            course(15, "Tecnología II", &[4, 5]),
            course(16, "Ingeniería Humana", &[4, 5]),
            course(17, "Informática II", &[6, 7]),
            // Ciclo de Desarrollo 4°
            course(18, "Diseño IV", &[9, 12, 13]),
            course(19, "Lenguaje Proyectual IV", &[11, 13]),
            course(20, "Pensamiento Contemporáneo IV", &[8]),
            course(21, "Tecnología III", &[10, 9]),
            course(22, "Economía y Marketing", &[3]),
            course(23, "Sociología", &[14]),
            // Ciclo de Investigación-Extensión 5°
            course(24, "Organización de la Producción", &[15, 17, 18, 19]),
            course(25, "Legislación y Práctica Profesional", &[15, 18, 19]),
            course(26, "Proyecto de Graduación", &[16, 18, 19, 20, 21, 22, 23]),
        ];

        let cycles = vec![
            cycle("Básico 1°", &[1, 2, 3, 4, 5]),
            cycle("Desarrollo 2°", &[6, 7, 8, 9, 10, 11]),
            cycle("Desarrollo 3°", &[12, 13, 14, 15, 16, 17]),
            cycle("Desarrollo 4°", &[18, 19, 20, 21, 22, 23]),
            cycle("Investigación-Extensión 5°", &[24, 25, 26]),
        ];

        Self::new(courses, cycles)
    }
}

/// An advisory catalog problem found by [`Catalog::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    NotInAnyCycle(CourseId),
    InMultipleCycles(CourseId, usize),
    UnknownCycleMember { cycle: String, id: CourseId },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInAnyCycle(id) => write!(f, "course {id} does not appear in any cycle"),
            Self::InMultipleCycles(id, n) => write!(f, "course {id} appears in {n} cycles"),
            Self::UnknownCycleMember { cycle, id } => {
                write!(f, "cycle \"{cycle}\" lists unknown course {id}")
            }
        }
    }
}

fn course(id: CourseId, name: &str, prereqs: &[CourseId]) -> Course {
    Course {
        id,
        name: name.to_string(),
        prereqs: prereqs.to_vec(),
    }
}

fn cycle(label: &str, courses: &[CourseId]) -> Cycle {
    Cycle {
        label: label.to_string(),
        courses: courses.to_vec(),
    }
}

fn ensure_acyclic(courses: &[Course], by_id: &BTreeMap<CourseId, usize>) -> Result<()> {
    // 0 = unvisited, 1 = on the current path, 2 = done
    fn visit(
        index: usize,
        courses: &[Course],
        by_id: &BTreeMap<CourseId, usize>,
        marks: &mut [u8],
        path: &mut Vec<CourseId>,
    ) -> Option<Vec<CourseId>> {
        match marks[index] {
            1 => {
                let id = courses[index].id;
                let start = path.iter().position(|&p| p == id).unwrap_or(0);
                let mut found = path[start..].to_vec();
                found.push(id);
                return Some(found);
            }
            2 => return None,
            _ => {}
        }

        marks[index] = 1;
        path.push(courses[index].id);
        for &prereq in &courses[index].prereqs {
            if let Some(&next) = by_id.get(&prereq) {
                if let Some(found) = visit(next, courses, by_id, marks, path) {
                    return Some(found);
                }
            }
        }
        path.pop();
        marks[index] = 2;
        None
    }

    let mut marks = vec![0u8; courses.len()];
    let mut path = Vec::new();
    for index in 0..courses.len() {
        if let Some(found) = visit(index, courses, by_id, &mut marks, &mut path) {
            let rendered = found.iter().map(ToString::to_string).join(" -> ");
            return Err(MallaError::CatalogInvalid(format!(
                "prerequisite cycle: {rendered}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 26);
        assert_eq!(catalog.cycles().len(), 5);
        assert!(catalog.audit().is_empty());
    }

    #[test]
    fn builtin_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let course = catalog.get(6).unwrap();
        assert_eq!(course.name, "Diseño II");
        assert_eq!(course.prereqs, vec![1, 2]);
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let courses = vec![course(1, "A", &[]), course(1, "B", &[])];
        let err = Catalog::new(courses, vec![]).unwrap_err();
        assert!(err.to_string().contains("duplicate course id 1"));
    }

    #[test]
    fn rejects_dangling_prerequisite() {
        let courses = vec![course(1, "A", &[7])];
        let err = Catalog::new(courses, vec![]).unwrap_err();
        assert!(err.to_string().contains("unknown course 7"));
    }

    #[test]
    fn rejects_self_reference() {
        let courses = vec![course(1, "A", &[1])];
        let err = Catalog::new(courses, vec![]).unwrap_err();
        assert!(err.to_string().contains("lists itself"));
    }

    #[test]
    fn rejects_prerequisite_cycle() {
        let courses = vec![course(1, "A", &[2]), course(2, "B", &[3]), course(3, "C", &[1])];
        let err = Catalog::new(courses, vec![]).unwrap_err();
        assert!(err.to_string().contains("prerequisite cycle"));
    }

    #[test]
    fn audit_reports_membership_issues() {
        let courses = vec![course(1, "A", &[]), course(2, "B", &[])];
        let cycles = vec![cycle("First", &[1, 1, 9])];
        let catalog = Catalog::new(courses, cycles).unwrap();

        let issues = catalog.audit();
        assert!(issues.contains(&CatalogIssue::InMultipleCycles(1, 2)));
        assert!(issues.contains(&CatalogIssue::NotInAnyCycle(2)));
        assert!(issues.contains(&CatalogIssue::UnknownCycleMember {
            cycle: "First".to_string(),
            id: 9,
        }));
    }

    #[test]
    fn loads_catalog_from_toml() {
        let raw = r#"
            [[courses]]
            id = 1
            name = "Intro"

            [[courses]]
            id = 2
            name = "Advanced"
            prereqs = [1]

            [[cycles]]
            label = "Year 1"
            courses = [1, 2]
        "#;
        let file: CatalogFile = toml::from_str(raw).unwrap();
        let catalog = Catalog::new(file.courses, file.cycles).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(2).unwrap().prereqs, vec![1]);
        assert!(catalog.audit().is_empty());
    }
}
