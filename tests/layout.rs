mod common;

mod layout {
    use core::mem::size_of;
    use nv_traceability::region::{CHECKSUM_OFFSET, DATA_SIZE, EXTEND_ZONE_OFFSET};
    use nv_traceability::zone::{EXTEND_ZONE_SIZE, ZONE_DEFINED};
    use nv_traceability::{
        DefinitionFlag, ExtendZone, ItemType, NV_TRACA_DATA_START, REGION_SIZE,
        TRACABILITY_ITEM_TYPE_MAX, TracabilityRegion, ZoneField,
    };
    use pretty_assertions::assert_eq;
    use strum::{EnumCount, IntoEnumIterator};

    // `tracability_item_type` without the `NV_TRACA_` prefix and `_I` suffix
    const DECLARATION_ORDER: [&str; 63] = [
        "IMEI",
        "BD_ADDR",
        "WIFI_ADDR",
        "TEST_STATUS",
        "REF_PCBA",
        "SHORT_CODE",
        "ICS",
        "SITE_FAC_PCBA",
        "LINE_FAC_PCBA",
        "DATE_PROD_PCBA",
        "SN_PCBA",
        "INDUS_REF_HANDSET",
        "INFO_PTM",
        "SITE_FAC_HANDSET",
        "LINE_FAC_HANDSET",
        "DATE_PROD_HANDSET",
        "SN_HANDSET",
        "INFO_PTS_MINI",
        "INFO_NAME_MINI",
        "INFO_TECH_MINI",
        "INFO_GOLDEN_FLAG",
        "INFO_GOLDEN_DATE",
        "INFO_ID_BAIE_HDTB",
        "INFO_DATE_PASS_HDTB",
        "INFO_PROD_BAIE_PARA_SYS",
        "INFO_STATUS_PARA_SYS",
        "INFO_NBRE_PASS_PARA_SYS",
        "INFO_DATE_PASS_PARA_SYS",
        "INFO_PROD_BAIE_PARA_SYS_2",
        "INFO_STATUS_PARA_SYS_2",
        "INFO_NBRE_PASS_PARA_SYS_2",
        "INFO_DATE_PASS_PARA_SYS_2",
        "INFO_PROD_BAIE_PARA_SYS_3",
        "INFO_STATUS_PARA_SYS_3",
        "INFO_NBRE_PASS_PARA_SYS_3",
        "INFO_DATE_PASS_PARA_SYS_3",
        "INFO_PROD_BAIE_BW",
        "INFO_STATUS_BW",
        "INFO_NBRE_PASS_BW",
        "INFO_DATE_BAIE_BW",
        "INFO_PROD_BAIE_GPS",
        "INFO_STATUS_GPS",
        "INFO_NBRE_PASS_GPS",
        "INFO_DATE_BAIE_GPS",
        "INFO_STATUS_MMI_TEST",
        "INFO_PROD_BAIE_FINAL",
        "INFO_STATUS_FINAL",
        "INFO_NBRE_PASS_FINAL",
        "INFO_DATE_BAIE_FINAL",
        "INFO_PROD_BAIE_FINAL_2",
        "INFO_STATUS_FINAL_2",
        "INFO_NBRE_PASS_FINAL_2",
        "INFO_DATE_BAIE_FINAL_2",
        "INFO_ID_BAIE_HDT",
        "INFO_DATE_PASS_HDT",
        "INFO_COMM_REF",
        "INFO_PTS_APPLI",
        "INFO_NAME_APPLI",
        "INFO_NAME_PERSO1",
        "INFO_NAME_PERSO2",
        "INFO_NAME_PERSO3",
        "INFO_NAME_PERSO4",
        "INFO_SPARE_REGION",
    ];

    #[test]
    fn struct_sizes() {
        assert_eq!(size_of::<ExtendZone>(), 16 + 4 + 6 + 6 + 15 + 427 + 1);
        assert_eq!(size_of::<ExtendZone>(), 475);
        assert_eq!(size_of::<TracabilityRegion>(), REGION_SIZE);
        assert_eq!(REGION_SIZE, 4 + 15 + 6 + 6 + 4 + 512 + 475 + 2);
        assert_eq!(REGION_SIZE, 1024);
    }

    #[test]
    fn declaration_order() {
        let names = ItemType::iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, DECLARATION_ORDER);

        for (idx, name) in DECLARATION_ORDER.iter().enumerate() {
            let item = ItemType::from_repr(idx as u8).unwrap();
            assert_eq!(item as usize, idx);
            assert_eq!(item, name.parse::<ItemType>().unwrap());
        }
    }

    #[test]
    fn sentinel_counts_all_items() {
        assert_eq!(TRACABILITY_ITEM_TYPE_MAX as usize, ItemType::iter().count());
        assert_eq!(TRACABILITY_ITEM_TYPE_MAX as usize, ItemType::COUNT);
        assert_eq!(TRACABILITY_ITEM_TYPE_MAX, 63);
        assert_eq!(ItemType::from_repr(TRACABILITY_ITEM_TYPE_MAX), None);
        assert_eq!(ItemType::from_repr(u8::MAX), None);
    }

    #[test]
    fn stored_tag_values() {
        assert_eq!(ItemType::Imei as u8, 0);
        assert_eq!(ItemType::TestStatus as u8, 3);
        assert_eq!(ItemType::InfoDateBaieGps as u8, 43);
        assert_eq!(ItemType::from_repr(44), Some(ItemType::InfoStatusMmiTest));
        assert_eq!(ItemType::InfoProdBaieFinal as u8, 45);
        assert_eq!(ItemType::InfoDateBaieFinal2 as u8, 52);
        assert_eq!(ItemType::InfoNamePerso4 as u8, 61);
        assert_eq!(ItemType::InfoSpareRegion as u8, 62);
        assert_eq!(u8::from(ItemType::InfoSpareRegion) + 1, TRACABILITY_ITEM_TYPE_MAX);
        assert_eq!(ItemType::InfoStatusMmiTest.to_string(), "INFO_STATUS_MMI_TEST");
        assert_eq!(ItemType::InfoStatusMmiTest.width(), 1);
    }

    #[test]
    fn stored_record_offsets() {
        assert_eq!(size_of::<TracabilityRegion>(), 1024);
        assert_eq!(EXTEND_ZONE_OFFSET, 547);
        assert_eq!(CHECKSUM_OFFSET, 1022);
        assert_eq!(CHECKSUM_OFFSET + 2, REGION_SIZE);
    }

    #[test]
    fn data_start() {
        assert_eq!(NV_TRACA_DATA_START, 4);
        assert_eq!(ItemType::from_repr(NV_TRACA_DATA_START), Some(ItemType::RefPcba));

        let fixed = ItemType::iter()
            .filter(|item| item.is_fixed())
            .collect::<Vec<_>>();
        assert_eq!(
            fixed,
            [
                ItemType::Imei,
                ItemType::BdAddr,
                ItemType::WifiAddr,
                ItemType::TestStatus
            ]
        );
        assert!(fixed.iter().all(|item| item.data_range().is_none()));
    }

    #[test]
    fn data_items_are_contiguous() {
        let mut expected_start = 0;
        for item in ItemType::iter().filter(|item| !item.is_fixed()) {
            let range = item.data_range().unwrap();
            assert_eq!(range.start, expected_start, "{item}");
            assert_eq!(range.len(), item.width(), "{item}");
            expected_start = range.end;
        }
        assert_eq!(expected_start, DATA_SIZE);
        assert_eq!(ItemType::InfoSpareRegion.width(), 245);
    }

    #[test]
    fn record_ranges() {
        assert_eq!(ItemType::Imei.record_range(), 4..19);
        assert_eq!(ItemType::BdAddr.record_range(), 19..25);
        assert_eq!(ItemType::WifiAddr.record_range(), 25..31);
        assert_eq!(ItemType::TestStatus.record_range(), 31..35);
        assert_eq!(ItemType::RefPcba.record_range(), 35..47);
        assert_eq!(ItemType::ShortCode.record_range(), 47..51);
        assert_eq!(ItemType::InfoSpareRegion.record_range(), 302..547);
        assert_eq!(EXTEND_ZONE_OFFSET, 547);
    }

    #[test]
    fn zone_fields_cover_zone() {
        let mut expected_start = 0;
        for field in ZoneField::iter() {
            let range = field.range();
            assert_eq!(range.start, expected_start, "{field}");
            expected_start = range.end;
        }
        assert_eq!(expected_start, EXTEND_ZONE_SIZE);
        assert_eq!(ZoneField::Imei2.to_string(), "IMEI_2");
        assert_eq!("AUTH_KEY".parse::<ZoneField>().unwrap(), ZoneField::AuthKey);
        assert_eq!(ZoneField::DefinitionFlag.range(), 474..475);
    }

    #[test]
    fn definition_flag() {
        assert_eq!(DefinitionFlag::from(0x31), DefinitionFlag::Defined);
        assert_eq!(DefinitionFlag::from(0xFF), DefinitionFlag::Undefined(0xFF));
        assert_eq!(DefinitionFlag::from(0x01), DefinitionFlag::Undefined(0x01));
        assert_eq!(u8::from(DefinitionFlag::Defined), ZONE_DEFINED);

        let mut zone = ExtendZone::erased();
        assert!(!zone.is_defined());
        assert_eq!(zone.definition_flag(), DefinitionFlag::Undefined(0xFF));
        zone.mark_defined();
        assert!(zone.is_defined());
        assert_eq!(zone.as_bytes()[EXTEND_ZONE_SIZE - 1], 0x31);
    }

    #[test]
    fn byte_exact_round_trip() {
        // every byte gets a distinct value
        let mut raw = [0u8; REGION_SIZE];
        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }

        let region = TracabilityRegion::from_bytes(raw);
        assert_eq!(region.name, [0, 1, 2, 3]);
        assert_eq!(region.imei, core::array::from_fn(|i| (i + 4) as u8));
        assert_eq!(region.item(ItemType::BdAddr), &raw[19..25]);
        assert_eq!(region.extend_zone.field(ZoneField::AuthKey), &raw[547..563]);
        assert_eq!(region.checksum, [(1022 % 251) as u8, (1023 % 251) as u8]);

        let copy = TracabilityRegion::try_from_slice(&region.to_bytes()).unwrap();
        assert_eq!(copy.to_bytes(), raw);
        assert_eq!(copy, region);
    }

    #[test]
    fn populated_fields_land_at_their_offsets() {
        let region = crate::common::populated_region();
        let raw = region.to_bytes();

        assert_eq!(&raw[0..4], b"TRAC");
        assert_eq!(&raw[4..19], b"356938035643809");
        assert_eq!(&raw[35..47], b"PCBA-0042-A1");
        assert_eq!(raw[REGION_SIZE - 3], 0x31);
        assert_eq!(TracabilityRegion::from_bytes(raw), region);
    }

    #[test]
    fn invalid_length() {
        assert_eq!(
            TracabilityRegion::try_from_slice(&[0u8; 1025]),
            Err(nv_traceability::error::Error::InvalidLength {
                expected: REGION_SIZE,
                actual: 1025
            })
        );
        assert_eq!(
            TracabilityRegion::try_from_slice(&[0u8; 1026]).err(),
            Some(nv_traceability::error::Error::InvalidLength {
                expected: REGION_SIZE,
                actual: 1026
            })
        );
    }
}
