//! Single-entry binding tests.

#[cfg(test)]
mod tests {
    use spodata_atom::ParseOptions;
    use spodata_model::sharepoint::{SpGroup, SpRoleDefinition};
    use spodata_model::{EntityObject, UnknownEntity};

    use crate::{NAMESPACES, SCHEME, entry_xml, parse_sharepoint};

    fn group_entry() -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<entry xml:base="https://contoso.sharepoint.com/sites/dev/_api/" {NAMESPACES} m:etag="&quot;2&quot;">
  <id>https://contoso.sharepoint.com/sites/dev/_api/Web/SiteGroups/GetById(7)</id>
  <category term="SP.Group" scheme="{SCHEME}" />
  <link rel="edit" href="Web/SiteGroups/GetById(7)" />
  <title />
  <updated>2024-03-01T10:00:00Z</updated>
  <author><name /></author>
  <content type="application/xml">
    <m:properties>
      <d:Id m:type="Edm.Int32">7</d:Id>
      <d:Title>Dev Members</d:Title>
      <d:Description m:null="true" />
      <d:IsHiddenInUI m:type="Edm.Boolean">false</d:IsHiddenInUI>
      <d:AllowMembersEditMembership m:type="Edm.Boolean">true</d:AllowMembersEditMembership>
      <d:PrincipalType m:type="Edm.Int32">8</d:PrincipalType>
      <d:RequestToJoinLeaveEmailSetting m:null="true" />
    </m:properties>
  </content>
</entry>"#
        )
    }

    #[test]
    fn test_should_bind_group_entry() {
        let group: SpGroup = parse_sharepoint(&group_entry(), ParseOptions::default())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");

        assert_eq!(group.id, 7);
        assert_eq!(group.title.as_deref(), Some("Dev Members"));
        assert_eq!(group.description, None);
        assert!(!group.is_hidden_in_ui);
        assert!(group.allow_members_edit_membership);
        assert_eq!(group.principal_type, 8);
        assert!(group.users.is_none());
    }

    #[test]
    fn test_should_fill_entity_metadata() {
        let group: SpGroup = parse_sharepoint(&group_entry(), ParseOptions::default())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");

        let metadata = group.metadata();
        assert_eq!(metadata.type_name.as_deref(), Some("SP.Group"));
        assert_eq!(metadata.etag.as_deref(), Some("\"2\""));
        assert_eq!(
            metadata.id.as_deref(),
            Some("https://contoso.sharepoint.com/sites/dev/_api/Web/SiteGroups/GetById(7)")
        );
        assert_eq!(
            metadata.uri.as_deref(),
            Some("https://contoso.sharepoint.com/sites/dev/_api/Web/SiteGroups/GetById(7)")
        );
    }

    #[test]
    fn test_should_fall_back_to_unknown_entity() {
        let xml = entry_xml(
            "SP.Data.DocumentsItem",
            "Items(3)",
            r#"<d:Id m:type="Edm.Int32">3</d:Id><d:Title>Budget</d:Title><d:Modified m:type="Edm.DateTime">2024-01-01T00:00:00Z</d:Modified>"#,
            "",
            true,
        );
        let entity = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_any_entity()
            .expect("entity shape")
            .expect("entity present");

        assert_eq!(entity.type_name(), "SP.Data.DocumentsItem");
        let item = entity.downcast_ref::<UnknownEntity>().expect("fallback type");
        assert_eq!(
            item.property("Id").and_then(|p| p.value.as_i32()),
            Some(3)
        );
        assert_eq!(
            item.property("Title").and_then(|p| p.value.as_str()),
            Some("Budget")
        );
        assert!(item.property("Modified").is_none());
    }

    #[test]
    fn test_should_yield_nothing_for_entry_without_category() {
        let xml = format!(
            r#"<entry {NAMESPACES}><id>x</id><content type="application/xml"><m:properties><d:Title>t</d:Title></m:properties></content></entry>"#
        );
        let document = parse_sharepoint(&xml, ParseOptions::default()).expect("parse");
        assert!(document.value().is_none());
    }

    #[test]
    fn test_should_bind_properties_outside_content() {
        let xml = format!(
            r#"<entry {NAMESPACES}><category term="SP.RoleDefinition" scheme="{SCHEME}"/><content type="application/xml" src="Web/RoleDefinitions(1073741829)"/><m:properties><d:Name>Full Control</d:Name><d:Order m:type="Edm.Int32">1</d:Order><d:RoleTypeKind m:type="Edm.Int32">5</d:RoleTypeKind></m:properties></entry>"#
        );
        let role: SpRoleDefinition = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");
        assert_eq!(role.name.as_deref(), Some("Full Control"));
        assert_eq!(role.order, 1);
        assert_eq!(role.role_type_kind, 5);
    }

    #[test]
    fn test_should_reject_entry_requested_as_other_type() {
        let err = parse_sharepoint(&group_entry(), ParseOptions::default())
            .expect("parse")
            .into_entity::<SpRoleDefinition>()
            .unwrap_err();
        assert!(!err.is_malformed_input());
    }
}
