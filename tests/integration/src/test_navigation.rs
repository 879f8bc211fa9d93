//! Navigation link binding tests.

#[cfg(test)]
mod tests {
    use spodata_atom::{AtomError, ParseOptions};
    use spodata_model::sharepoint::{SpFolder, SpGroup};
    use spodata_model::{BindingError, UnknownEntity};

    use crate::{entry_xml, parse_sharepoint};

    const RELATED: &str = "http://schemas.microsoft.com/ado/2007/08/dataservices/related";

    fn link(title: &str, link_type: &str, href: &str, inline: &str) -> String {
        format!(
            r#"<link rel="{RELATED}/{title}" type="application/atom+xml;type={link_type}" title="{title}" href="{href}">{inline}</link>"#
        )
    }

    fn user(id: i32, title: &str) -> String {
        entry_xml(
            "SP.User",
            &format!("Web/GetUserById({id})"),
            &format!(r#"<d:Id m:type="Edm.Int32">{id}</d:Id><d:Title>{title}</d:Title>"#),
            "",
            false,
        )
    }

    fn group_with(links: &str) -> String {
        entry_xml(
            "SP.Group",
            "Web/SiteGroups/GetById(7)",
            r#"<d:Id m:type="Edm.Int32">7</d:Id><d:Title>Dev Members</d:Title>"#,
            links,
            true,
        )
    }

    fn bind_group(xml: &str, options: ParseOptions) -> Result<SpGroup, AtomError> {
        parse_sharepoint(xml, options)?
            .into_entity::<SpGroup>()
            .map(|g| g.expect("entity present"))
    }

    #[test]
    fn test_should_bind_deferred_link() {
        let xml = group_with(&link("Users", "feed", "Web/SiteGroups/GetById(7)/Users", ""));
        let group = bind_group(&xml, ParseOptions::default()).expect("bind");

        let users = group.users.expect("users link bound");
        assert!(users.is_deferred());
        assert!(users.is_empty());
        assert_eq!(users.deferred_uri(), Some("Web/SiteGroups/GetById(7)/Users"));
    }

    #[test]
    fn test_should_bind_inline_feed() {
        let inline = format!(
            "<m:inline><feed><id>users</id>{}{}</feed></m:inline>",
            user(10, "Ada"),
            user(11, "Grace")
        );
        let xml = group_with(&link("Users", "feed", "Web/SiteGroups/GetById(7)/Users", &inline));
        let group = bind_group(&xml, ParseOptions::default()).expect("bind");

        let users = group.users.expect("users link bound");
        assert!(!users.is_deferred());
        assert_eq!(users.len(), 2);
        assert_eq!(users.get(0).and_then(|u| u.title.as_deref()), Some("Ada"));
        assert_eq!(users.get(1).map(|u| u.id), Some(11));
        assert_eq!(group.title.as_deref(), Some("Dev Members"));
    }

    #[test]
    fn test_should_resolve_empty_inline() {
        let xml = group_with(&link(
            "Users",
            "feed",
            "Web/SiteGroups/GetById(7)/Users",
            "<m:inline/>",
        ));
        let group = bind_group(&xml, ParseOptions::default()).expect("bind");

        let users = group.users.expect("users link bound");
        assert!(!users.is_deferred());
        assert!(users.is_empty());
    }

    #[test]
    fn test_should_bind_inline_entries_of_several_links() {
        let parent = entry_xml(
            "SP.Folder",
            "Web/GetFolderByServerRelativeUrl('/sites/dev')",
            "<d:Name>dev</d:Name>",
            "",
            false,
        );
        let item = entry_xml(
            "SP.Data.DocumentsItem",
            "Items(4)",
            r#"<d:Id m:type="Edm.Int32">4</d:Id>"#,
            "",
            false,
        );
        let links = [
            link(
                "ParentFolder",
                "entry",
                "Folder/ParentFolder",
                &format!("<m:inline>{parent}</m:inline>"),
            ),
            link(
                "ListItemAllFields",
                "entry",
                "Folder/ListItemAllFields",
                &format!("<m:inline>{item}</m:inline>"),
            ),
            link("Folders", "feed", "Folder/Folders", ""),
        ]
        .concat();
        let xml = entry_xml("SP.Folder", "Folder", "<d:Name>Shared Documents</d:Name>", &links, true);

        let folder: SpFolder = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");

        assert_eq!(folder.name.as_deref(), Some("Shared Documents"));
        let parent = folder.parent_folder.expect("parent bound");
        assert_eq!(parent.get(0).and_then(|f| f.name.as_deref()), Some("dev"));
        let item = folder.list_item_all_fields.expect("list item bound");
        assert_eq!(
            item.get(0)
                .and_then(|i: &UnknownEntity| i.property("Id"))
                .and_then(|p| p.value.as_i32()),
            Some(4)
        );
        assert!(folder.folders.expect("folders bound").is_deferred());
    }

    #[test]
    fn test_should_fail_strict_on_inline_entity_of_wrong_type() {
        let inline = format!(
            "<m:inline>{}</m:inline>",
            entry_xml("SP.Group", "g", "", "", false)
        );
        let xml = group_with(&link("Users", "feed", "Users", &inline));

        let err = bind_group(&xml, ParseOptions::strict()).unwrap_err();
        assert!(matches!(
            err,
            AtomError::Binding(BindingError::InlineEntityMismatch { ref field, .. }) if field == "Users"
        ));

        let group = bind_group(&xml, ParseOptions::lenient()).expect("lenient bind");
        assert!(group.users.is_none());
        assert_eq!(group.id, 7);
    }

    #[test]
    fn test_should_always_fail_on_link_to_plain_field() {
        let xml = group_with(&link("Title", "entry", "Title", ""));
        for options in [ParseOptions::strict(), ParseOptions::lenient()] {
            let err = bind_group(&xml, options).unwrap_err();
            assert!(matches!(
                err,
                AtomError::Binding(BindingError::NotNavigation { .. })
            ));
        }
    }

    #[test]
    fn test_should_skip_links_without_matching_field() {
        let xml = group_with(&link("Owner", "entry", "Web/SiteGroups/GetById(7)/Owner", ""));
        let group = bind_group(&xml, ParseOptions::default()).expect("bind");
        assert_eq!(group.id, 7);
        assert!(group.users.is_none());
    }
}
