//! SharePoint REST types.
//!
//! The entity and complex types a SharePoint 2013+ `_api` endpoint returns
//! for groups, users, folders, role definitions and context information,
//! plus a process-wide [`registry`] holding all of them.

use std::time::{Duration, SystemTime};

use once_cell::sync::Lazy;

use crate::navigation::NavigationProperty;
use crate::registry::TypeRegistry;
use crate::unknown::UnknownEntity;

/// Refresh a form digest this long before the server expires it.
pub const DIGEST_REFRESH_MARGIN: Duration = Duration::from_secs(60);

crate::odata_entity! {
    /// A SharePoint group.
    pub struct SpGroup => "SP.Group" {
        /// Numeric id.
        pub id: i32 => "Id",
        /// Display title.
        pub title: Option<String> => "Title",
        /// Description.
        pub description: Option<String> => "Description",
        /// Login name.
        pub login_name: Option<String> => "LoginName",
        /// Title of the owning principal.
        pub owner_title: Option<String> => "OwnerTitle",
        /// Hidden from the UI.
        pub is_hidden_in_ui: bool => "IsHiddenInUI",
        /// Members may edit membership.
        pub allow_members_edit_membership: bool => "AllowMembersEditMembership",
        /// Only members may view membership.
        pub only_allow_members_view_membership: bool => "OnlyAllowMembersViewMembership",
        /// Principal type flags.
        pub principal_type: i32 => "PrincipalType",
        /// Group members.
        pub users: Option<NavigationProperty<SpUser>> => "Users",
    }
}

crate::odata_entity! {
    /// A SharePoint user.
    pub struct SpUser => "SP.User" {
        /// Numeric id.
        pub id: i32 => "Id",
        /// Display title.
        pub title: Option<String> => "Title",
        /// Login name.
        pub login_name: Option<String> => "LoginName",
        /// Email address.
        pub email: Option<String> => "Email",
        /// Site collection administrator.
        pub is_site_admin: bool => "IsSiteAdmin",
        /// Hidden from the UI.
        pub is_hidden_in_ui: bool => "IsHiddenInUI",
        /// Principal type flags.
        pub principal_type: i32 => "PrincipalType",
        /// Groups the user belongs to.
        pub groups: Option<NavigationProperty<SpGroup>> => "Groups",
    }
}

crate::odata_complex! {
    /// A decoded resource path.
    pub struct ResourcePath => "SP.ResourcePath" {
        /// The decoded URL.
        pub decoded_url: Option<String> => "DecodedUrl",
    }
}

crate::odata_entity! {
    /// A folder in a document library or list.
    pub struct SpFolder => "SP.Folder" {
        /// Folder name.
        pub name: Option<String> => "Name",
        /// Server-relative URL.
        pub server_relative_url: Option<String> => "ServerRelativeUrl",
        /// Number of items in the folder.
        pub item_count: i32 => "ItemCount",
        /// Whether the folder exists.
        pub exists: bool => "Exists",
        /// Welcome page.
        pub welcome_page: Option<String> => "WelcomePage",
        /// Server-relative path.
        pub server_relative_path: Option<ResourcePath> => "ServerRelativePath",
        /// Sub-folders.
        pub folders: Option<NavigationProperty<SpFolder>> => "Folders",
        /// Containing folder.
        pub parent_folder: Option<NavigationProperty<SpFolder>> => "ParentFolder",
        /// The list item behind the folder. Its type is list-specific.
        pub list_item_all_fields: Option<NavigationProperty<UnknownEntity>> => "ListItemAllFields",
    }
}

crate::odata_entity! {
    /// A permission level.
    pub struct SpRoleDefinition => "SP.RoleDefinition" {
        /// Numeric id.
        pub id: i32 => "Id",
        /// Name.
        pub name: Option<String> => "Name",
        /// Description.
        pub description: Option<String> => "Description",
        /// Hidden from the UI.
        pub hidden: bool => "Hidden",
        /// Sort order.
        pub order: i32 => "Order",
        /// Built-in role kind.
        pub role_type_kind: i32 => "RoleTypeKind",
    }
}

crate::odata_complex! {
    /// Result of `_api/contextinfo`.
    pub struct ContextWebInformation => "SP.ContextWebInformation" {
        /// Request digest for write operations.
        pub form_digest_value: Option<String> => "FormDigestValue",
        /// Digest lifetime, in seconds from when it was issued.
        pub form_digest_timeout_seconds: i32 => "FormDigestTimeoutSeconds",
        /// Server library version.
        pub library_version: Option<String> => "LibraryVersion",
        /// Absolute URL of the site collection.
        pub site_full_url: Option<String> => "SiteFullUrl",
        /// Absolute URL of the web.
        pub web_full_url: Option<String> => "WebFullUrl",
    }
}

impl ContextWebInformation {
    /// Whether the digest fetched at `fetched_at` expires within `margin` of `now`.
    ///
    /// A missing digest always counts as expired.
    #[must_use]
    pub fn digest_expires_within(
        &self,
        fetched_at: SystemTime,
        now: SystemTime,
        margin: Duration,
    ) -> bool {
        if self.form_digest_value.is_none() {
            return true;
        }
        let seconds = u64::try_from(self.form_digest_timeout_seconds).unwrap_or(0);
        let lifetime = Duration::from_secs(seconds);
        match (fetched_at + lifetime).duration_since(now) {
            Ok(remaining) => remaining < margin,
            Err(_) => true,
        }
    }

    /// Whether a digest fetched at `fetched_at` must be refreshed before use.
    #[must_use]
    pub fn needs_refresh(&self, fetched_at: SystemTime) -> bool {
        self.digest_expires_within(fetched_at, SystemTime::now(), DIGEST_REFRESH_MARGIN)
    }
}

static REGISTRY: Lazy<TypeRegistry> = Lazy::new(|| {
    TypeRegistry::builder()
        .entity::<SpGroup>()
        .entity::<SpUser>()
        .entity::<SpFolder>()
        .entity::<SpRoleDefinition>()
        .complex::<ContextWebInformation>()
        .complex::<ResourcePath>()
        .build()
        .expect("SharePoint wire type names are distinct and not reserved")
});

/// The shared registry of every SharePoint type in this module.
#[must_use]
pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}
