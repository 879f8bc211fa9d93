//! Feed binding tests.

#[cfg(test)]
mod tests {
    use spodata_atom::{AtomError, ParseOptions};
    use spodata_model::sharepoint::{SpGroup, SpUser};
    use spodata_model::{EntityObject, UnknownEntity};

    use crate::{entry_xml, feed_xml, parse_sharepoint};

    fn group(id: i32, title: &str) -> String {
        entry_xml(
            "SP.Group",
            &format!("Web/SiteGroups/GetById({id})"),
            &format!(r#"<d:Id m:type="Edm.Int32">{id}</d:Id><d:Title>{title}</d:Title>"#),
            "",
            false,
        )
    }

    #[test]
    fn test_should_bind_feed_in_document_order() {
        let xml = feed_xml(&[group(3, "Owners"), group(4, "Members"), group(5, "Visitors")]);
        let groups = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_collection::<SpGroup>()
            .expect("collection shape")
            .expect("collection present");

        let titles: Vec<_> = groups.iter().filter_map(|g| g.title.as_deref()).collect();
        assert_eq!(titles, ["Owners", "Members", "Visitors"]);
        assert_eq!(groups.entities()[1].id, 4);
        assert_eq!(
            groups.entities()[0].metadata().id.as_deref(),
            Some("Web/SiteGroups/GetById(3)")
        );
    }

    #[test]
    fn test_should_bind_empty_feed() {
        let document = parse_sharepoint(&feed_xml(&[]), ParseOptions::default()).expect("parse");
        assert!(document.is_collection());
        let groups = document
            .into_collection::<SpGroup>()
            .expect("collection shape")
            .expect("collection present");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_should_keep_mixed_entity_types() {
        let user = entry_xml(
            "SP.User",
            "Web/SiteUsers/GetById(9)",
            r#"<d:Id m:type="Edm.Int32">9</d:Id><d:Email>ada@contoso.com</d:Email>"#,
            "",
            false,
        );
        let item = entry_xml("SP.Data.TasksListItem", "Items(1)", "<d:Title>Ship</d:Title>", "", false);
        let xml = feed_xml(&[group(3, "Owners"), user, item]);

        let collection = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_any_collection()
            .expect("collection shape")
            .expect("collection present");

        assert_eq!(collection.len(), 3);
        assert!(collection.entities()[0].is::<SpGroup>());
        let user = collection.entities()[1]
            .downcast_ref::<SpUser>()
            .expect("user");
        assert_eq!(user.email.as_deref(), Some("ada@contoso.com"));
        assert!(collection.entities()[2].is::<UnknownEntity>());
    }

    #[test]
    fn test_should_reject_mixed_feed_for_typed_request() {
        let user = entry_xml("SP.User", "u", "", "", false);
        let xml = feed_xml(&[group(3, "Owners"), user]);
        let err = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_collection::<SpGroup>()
            .unwrap_err();
        assert!(matches!(
            err,
            AtomError::StructuralMismatch { ref expected, ref found }
                if expected == "SP.Group" && found == "SP.User"
        ));
    }

    #[test]
    fn test_should_reject_feed_requested_as_entity() {
        let xml = feed_xml(&[group(3, "Owners")]);
        let err = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_entity::<SpGroup>()
            .unwrap_err();
        assert!(matches!(err, AtomError::StructuralMismatch { .. }));
    }
}
