//! Attachment kind taxonomy
//!
//! Every uploaded file belongs to exactly one kind. The kind determines
//! which resource type (if any) owns the file, how many files that owner
//! may hold, and which asset directory the bytes land in.

use serde::{Deserialize, Serialize};

/// Resource kinds that expose CRUD endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Member,
    Paper,
    Activity,
    Project,
    News,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Paper => "paper",
            Self::Activity => "activity",
            Self::Project => "project",
            Self::News => "news",
        }
    }

    /// Human-readable name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Paper => "Paper",
            Self::Activity => "Activity",
            Self::Project => "Project",
            Self::News => "News",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How many attachments of a kind one owner may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    AtMostOne,
    Many,
}

/// Which flat directory the stored bytes live under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Images,
    Attachments,
}

impl AssetClass {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Attachments => "attachments",
        }
    }
}

/// All attachment kinds in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    MemberImage,
    PaperAttachment,
    ActivityImage,
    ProjectIcon,
    NewsImage,
    ProjectTaskImage,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemberImage => "member_image",
            Self::PaperAttachment => "paper_attachment",
            Self::ActivityImage => "activity_image",
            Self::ProjectIcon => "project_icon",
            Self::NewsImage => "news_image",
            Self::ProjectTaskImage => "project_task_image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "member_image" => Some(Self::MemberImage),
            "paper_attachment" => Some(Self::PaperAttachment),
            "activity_image" => Some(Self::ActivityImage),
            "project_icon" => Some(Self::ProjectIcon),
            "news_image" => Some(Self::NewsImage),
            "project_task_image" => Some(Self::ProjectTaskImage),
            _ => None,
        }
    }

    /// The resource kind owning this attachment, or `None` for globally
    /// listed assets.
    pub fn owner(&self) -> Option<ResourceKind> {
        match self {
            Self::MemberImage => Some(ResourceKind::Member),
            Self::PaperAttachment => Some(ResourceKind::Paper),
            Self::ActivityImage => Some(ResourceKind::Activity),
            Self::ProjectIcon => Some(ResourceKind::Project),
            Self::NewsImage | Self::ProjectTaskImage => None,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::MemberImage | Self::PaperAttachment | Self::ProjectIcon => {
                Cardinality::AtMostOne
            }
            Self::ActivityImage | Self::NewsImage | Self::ProjectTaskImage => Cardinality::Many,
        }
    }

    pub fn asset_class(&self) -> AssetClass {
        match self {
            Self::PaperAttachment => AssetClass::Attachments,
            _ => AssetClass::Images,
        }
    }

    /// Human-readable name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::MemberImage => "member image",
            Self::PaperAttachment => "paper attachment",
            Self::ActivityImage => "activity image",
            Self::ProjectIcon => "project icon",
            Self::NewsImage => "news image",
            Self::ProjectTaskImage => "task image",
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for kind in [
            AttachmentKind::MemberImage,
            AttachmentKind::PaperAttachment,
            AttachmentKind::ActivityImage,
            AttachmentKind::ProjectIcon,
            AttachmentKind::NewsImage,
            AttachmentKind::ProjectTaskImage,
        ] {
            assert_eq!(AttachmentKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(AttachmentKind::from_str("unknown"), None);
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(
            AttachmentKind::MemberImage.cardinality(),
            Cardinality::AtMostOne
        );
        assert_eq!(
            AttachmentKind::ProjectIcon.cardinality(),
            Cardinality::AtMostOne
        );
        assert_eq!(AttachmentKind::ActivityImage.cardinality(), Cardinality::Many);
        assert_eq!(AttachmentKind::NewsImage.cardinality(), Cardinality::Many);
    }

    #[test]
    fn test_owners() {
        assert_eq!(AttachmentKind::MemberImage.owner(), Some(ResourceKind::Member));
        assert_eq!(AttachmentKind::NewsImage.owner(), None);
        assert_eq!(AttachmentKind::ProjectTaskImage.owner(), None);
    }

    #[test]
    fn test_asset_class() {
        assert_eq!(
            AttachmentKind::PaperAttachment.asset_class().dir_name(),
            "attachments"
        );
        assert_eq!(AttachmentKind::MemberImage.asset_class().dir_name(), "images");
    }
}
