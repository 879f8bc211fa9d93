//! Property value and complex type tests.

#[cfg(test)]
mod tests {
    use spodata_atom::ParseOptions;
    use spodata_model::sharepoint::{ContextWebInformation, ResourcePath, SpFolder, SpUser};
    use spodata_model::{ScalarKind, TypeRegistry};

    use crate::{NAMESPACES, entry_xml, parse_sharepoint, parse_with};

    spodata_model::odata_complex! {
        /// Innermost complex value.
        pub struct Bar => "Test.Bar" {
            /// Text field.
            pub foo: Option<String> => "Foo",
        }
    }

    spodata_model::odata_complex! {
        /// Complex value holding another one.
        pub struct Outer => "Test.Outer" {
            /// Nested value.
            pub bar: Option<Bar> => "Bar",
            /// Counter.
            pub count: i32 => "Count",
        }
    }

    spodata_model::odata_entity! {
        /// Entity with a nested complex property.
        pub struct Holder => "Test.Holder" {
            /// Id.
            pub id: i32 => "Id",
            /// Nested value.
            pub outer: Option<Outer> => "Outer",
        }
    }

    fn registry() -> TypeRegistry {
        TypeRegistry::builder()
            .entity::<Holder>()
            .complex::<Outer>()
            .complex::<Bar>()
            .build()
            .expect("registry")
    }

    #[test]
    fn test_should_bind_nested_complex_values() {
        let xml = entry_xml(
            "Test.Holder",
            "Holders(1)",
            r#"<d:Id m:type="Edm.Int32">1</d:Id>
               <d:Outer m:type="Test.Outer">
                 <d:Count m:type="Edm.Int32">2</d:Count>
                 <d:Bar m:type="Test.Bar"><d:Foo>bar</d:Foo></d:Bar>
               </d:Outer>"#,
            "",
            true,
        );
        let holder: Holder = parse_with(&xml, &registry(), ParseOptions::default())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");

        let outer = holder.outer.expect("outer bound");
        assert_eq!(outer.count, 2);
        assert_eq!(outer.bar.and_then(|b| b.foo).as_deref(), Some("bar"));
    }

    #[test]
    fn test_should_drop_unregistered_complex_values() {
        let xml = entry_xml(
            "Test.Holder",
            "Holders(1)",
            r#"<d:Id m:type="Edm.Int32">1</d:Id><d:Outer m:type="Test.Missing"><d:Count>2</d:Count></d:Outer>"#,
            "",
            true,
        );
        let holder: Holder = parse_with(&xml, &registry(), ParseOptions::strict())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");
        assert_eq!(holder.id, 1);
        assert!(holder.outer.is_none());
    }

    #[test]
    fn test_should_bind_booleans_case_insensitively() {
        let cases = [
            ("true", true),
            ("TRUE", true),
            ("True", true),
            ("false", false),
            ("yes", false),
            (" True ", false),
            ("\ntrue\n", false),
        ];
        for (text, expected) in cases {
            let xml = entry_xml(
                "SP.User",
                "u",
                &format!(r#"<d:IsSiteAdmin m:type="Edm.Boolean">{text}</d:IsSiteAdmin>"#),
                "",
                true,
            );
            let user: SpUser = parse_sharepoint(&xml, ParseOptions::default())
                .expect("parse")
                .into_entity()
                .expect("entity shape")
                .expect("entity present");
            assert_eq!(user.is_site_admin, expected, "text {text:?}");
        }
    }

    #[test]
    fn test_should_bind_complex_property_on_sharepoint_entity() {
        let xml = entry_xml(
            "SP.Folder",
            "Folder",
            r#"<d:ItemCount m:type="Edm.Int32">12</d:ItemCount><d:Exists m:type="Edm.Boolean">true</d:Exists><d:ServerRelativePath m:type="SP.ResourcePath"><d:DecodedUrl>/sites/dev/Shared Documents</d:DecodedUrl></d:ServerRelativePath>"#,
            "",
            true,
        );
        let folder: SpFolder = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_entity()
            .expect("entity shape")
            .expect("entity present");
        assert_eq!(folder.item_count, 12);
        assert!(folder.exists);
        assert_eq!(
            folder.server_relative_path.and_then(|p| p.decoded_url).as_deref(),
            Some("/sites/dev/Shared Documents")
        );
    }

    #[test]
    fn test_should_bind_top_level_complex_value() {
        let xml = format!(
            r#"<d:GetContextWebInformation {NAMESPACES} m:type="SP.ContextWebInformation">
                 <d:FormDigestTimeoutSeconds m:type="Edm.Int32">1800</d:FormDigestTimeoutSeconds>
                 <d:FormDigestValue>0x1234,01 Jan 2024 00:00:00 -0000</d:FormDigestValue>
                 <d:LibraryVersion>16.0.0.0</d:LibraryVersion>
                 <d:SiteFullUrl>https://contoso.sharepoint.com/sites/dev</d:SiteFullUrl>
                 <d:SupportedSchemaVersions m:type="Collection(Edm.String)"><d:element>14.0.0.0</d:element></d:SupportedSchemaVersions>
                 <d:WebFullUrl>https://contoso.sharepoint.com/sites/dev</d:WebFullUrl>
               </d:GetContextWebInformation>"#
        );
        let info: ContextWebInformation = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_complex()
            .expect("complex shape")
            .expect("complex present");
        assert_eq!(info.form_digest_timeout_seconds, 1800);
        assert_eq!(
            info.form_digest_value.as_deref(),
            Some("0x1234,01 Jan 2024 00:00:00 -0000")
        );
        assert_eq!(info.library_version.as_deref(), Some("16.0.0.0"));
        assert_eq!(info.web_full_url.as_deref(), Some("https://contoso.sharepoint.com/sites/dev"));
    }

    #[test]
    fn test_should_bind_top_level_scalar_value() {
        let xml = format!(r#"<d:ItemCount {NAMESPACES} m:type="Edm.Int32">42</d:ItemCount>"#);
        let scalar = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_scalar()
            .expect("scalar shape")
            .expect("scalar present");
        assert_eq!(scalar.name, "ItemCount");
        assert_eq!(scalar.kind(), ScalarKind::Int32);
        assert_eq!(scalar.value.as_i32(), Some(42));
    }

    #[test]
    fn test_should_reject_top_level_complex_of_other_type() {
        let xml = format!(
            r#"<d:ServerRelativePath {NAMESPACES} m:type="SP.ResourcePath"><d:DecodedUrl>/x</d:DecodedUrl></d:ServerRelativePath>"#
        );
        let path: ResourcePath = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_complex()
            .expect("complex shape")
            .expect("complex present");
        assert_eq!(path.decoded_url.as_deref(), Some("/x"));

        let err = parse_sharepoint(&xml, ParseOptions::default())
            .expect("parse")
            .into_complex::<ContextWebInformation>()
            .unwrap_err();
        assert!(!err.is_malformed_input());
    }
}
