//! Write payload tests.

#[cfg(test)]
mod tests {
    use spodata_atom::{ParseOptions, encode_odata_url, entity_to_payload};
    use spodata_model::sharepoint::{self, SpGroup};
    use spodata_model::{EntityObject, UnknownEntity};

    use crate::parse_sharepoint;

    fn engineering() -> SpGroup {
        SpGroup {
            id: 21,
            title: Some("Engineering".to_owned()),
            description: Some("Builders & testers".to_owned()),
            ..SpGroup::default()
        }
    }

    #[test]
    fn test_should_read_back_written_payload() {
        let xml = entity_to_payload(
            sharepoint::registry(),
            &engineering(),
            &["Title", "Description"],
        )
        .expect("payload");

        let group: SpGroup = parse_sharepoint(&xml, ParseOptions::strict())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");
        assert_eq!(group.title.as_deref(), Some("Engineering"));
        assert_eq!(group.description.as_deref(), Some("Builders & testers"));
        assert_eq!(group.metadata().type_name.as_deref(), Some("SP.Group"));
    }

    #[test]
    fn test_should_write_untyped_text_for_every_field() {
        let xml = entity_to_payload(sharepoint::registry(), &engineering(), &["Id", "Title"])
            .expect("payload");
        assert!(xml.contains("<d:Id>21</d:Id><d:Title>Engineering</d:Title>"));
        assert!(!xml.contains("m:type"));

        // Untyped text does not bind onto an integer field.
        let err = parse_sharepoint(&xml, ParseOptions::strict()).unwrap_err();
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_should_refuse_unregistered_entity() {
        let item = UnknownEntity::new("SP.Data.TasksListItem");
        assert!(entity_to_payload(sharepoint::registry(), &item, &["Title"]).is_err());
    }

    #[test]
    fn test_should_encode_spaces_in_request_urls() {
        assert_eq!(
            encode_odata_url("Web/GetFolderByServerRelativeUrl('/sites/dev/Shared Documents')"),
            "Web/GetFolderByServerRelativeUrl('/sites/dev/Shared%20Documents')"
        );
    }
}
