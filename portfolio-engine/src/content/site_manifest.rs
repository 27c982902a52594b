use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use super::ContentError;

/// Every table the portfolio sections render from.
#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct SiteManifest {
    pub profile: Profile,
    pub skills: SkillTables,
    pub projects: Vec<Project>,
    pub experience: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub image: String,
    pub email: String,
    pub location: String,
    pub github: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SkillTables {
    pub technologies: Vec<Technology>,
    pub concepts: Vec<String>,
    pub highlights: Vec<Highlight>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Technology {
    pub name: String,
    #[serde(default)]
    pub colour: Option<String>,
}

impl Technology {
    pub fn colour(&self) -> Result<Option<Color>, ContentError> {
        self.colour
            .as_deref()
            .map(|hex| {
                Srgba::hex(hex)
                    .map(Color::Srgba)
                    .map_err(|e| ContentError::InvalidColour {
                        value: hex.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Highlight {
    pub title_key: String,
    pub description_key: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Professional,
    Personal,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectImage {
    pub url: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    pub id: String,
    pub title_key: String,
    pub description_key: String,
    #[serde(default)]
    pub full_description_key: Option<String>,
    pub tags: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
}

impl Project {
    /// Translation key for an image caption: `<project>.images.<file stem>`.
    pub fn caption_key(&self, image: &ProjectImage) -> String {
        let prefix = self
            .title_key
            .strip_suffix(".title")
            .unwrap_or(&self.title_key);
        let stem = Path::new(&image.url)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        format!("{prefix}.images.{stem}")
    }
}

/// Project list tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(ProjectKind),
}

impl ProjectFilter {
    pub const TABS: [ProjectFilter; 3] = [
        ProjectFilter::All,
        ProjectFilter::Only(ProjectKind::Professional),
        ProjectFilter::Only(ProjectKind::Personal),
    ];

    pub fn accepts(self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Only(kind) => project.kind == kind,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            ProjectFilter::All => "projects.viewAll",
            ProjectFilter::Only(ProjectKind::Professional) => "projects.professional",
            ProjectFilter::Only(ProjectKind::Personal) => "projects.personal",
        }
    }
}

impl SiteManifest {
    pub fn filtered_projects(&self, filter: ProjectFilter) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |p| filter.accepts(p))
    }

    pub fn project_count(&self, filter: ProjectFilter) -> usize {
        self.filtered_projects(filter).count()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// One experience or education item.
#[derive(Deserialize, Debug, Clone)]
pub struct TimelineEntry {
    pub id: String,
    pub title_key: String,
    pub organization: String,
    pub location: String,
    pub period: String,
    pub description_key: String,
    #[serde(default)]
    pub highlight_keys: Vec<String>,
    #[serde(default)]
    pub skill_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "profile": {
            "name": "Annie", "image": "images/profile.png",
            "email": "annie@example.com", "location": "Madagascar",
            "github": "https://github.com/example"
        },
        "skills": {
            "technologies": [{ "name": "Rust", "colour": "#DEA584" }, { "name": "Git" }],
            "concepts": ["Responsive Design"],
            "highlights": [{ "title_key": "skills.a.title", "description_key": "skills.a.description" }]
        },
        "projects": [
            { "id": "hms", "title_key": "projects.hotelManagement.title",
              "description_key": "projects.hotelManagement.description",
              "tags": ["Angular"], "image": "images/hms/home.png",
              "images": [{ "url": "images/hms/booking_page.png", "description": "Booking" }],
              "type": "professional" },
            { "id": "site", "title_key": "projects.portfolio.title",
              "description_key": "projects.portfolio.description",
              "tags": ["Rust"], "image": "images/site.png", "type": "personal" },
            { "id": "lms", "title_key": "projects.learning.title",
              "description_key": "projects.learning.description",
              "tags": ["React"], "image": "images/lms.png", "type": "professional" }
        ],
        "experience": [],
        "education": [
            { "id": "1", "title_key": "education.master.title", "organization": "EMIT",
              "location": "Madagascar", "period": "2024 - 2025",
              "description_key": "education.master.description",
              "skill_keys": ["education.master.skills.it"] }
        ]
    }"##;

    fn manifest() -> SiteManifest {
        serde_json::from_str(SAMPLE).expect("sample manifest parses")
    }

    #[test]
    fn filters_and_counts_by_kind() {
        let manifest = manifest();
        assert_eq!(manifest.project_count(ProjectFilter::All), 3);
        assert_eq!(
            manifest.project_count(ProjectFilter::Only(ProjectKind::Professional)),
            2
        );
        let personal: Vec<_> = manifest
            .filtered_projects(ProjectFilter::Only(ProjectKind::Personal))
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(personal, vec!["site"]);
    }

    #[test]
    fn caption_keys_use_project_prefix_and_file_stem() {
        let manifest = manifest();
        let project = manifest.project("hms").expect("project");
        assert_eq!(
            project.caption_key(&project.images[0]),
            "projects.hotelManagement.images.booking_page"
        );
    }

    #[test]
    fn technology_colours_parse_when_present() {
        let manifest = manifest();
        assert!(manifest.skills.technologies[0].colour().expect("hex").is_some());
        assert!(manifest.skills.technologies[1].colour().expect("none").is_none());
        let broken = Technology {
            name: "x".into(),
            colour: Some("#zz".into()),
        };
        assert!(broken.colour().is_err());
    }

    #[test]
    fn optional_timeline_lists_default_to_empty() {
        let manifest = manifest();
        assert!(manifest.education[0].highlight_keys.is_empty());
        assert_eq!(manifest.education[0].skill_keys.len(), 1);
    }
}
