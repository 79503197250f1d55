//! Field tags of the traceability record.
//!
//! The discriminants are persisted by factory tooling and must never be reordered. The first four
//! tags name the dedicated fields at the start of the record, every following tag names a slice
//! of the flat `data` buffer. Slices are laid out back to back in declaration order.

use crate::region::{
    BD_ADDR_OFFSET, BD_ADDR_SIZE, DATA_OFFSET, DATA_SIZE, IMEI_OFFSET, IMEI_SIZE,
    TEST_STATUS_OFFSET, TEST_STATUS_SIZE, WIFI_ADDR_OFFSET, WIFI_ADDR_SIZE,
};
use core::ops::Range;

/// First tag stored inside the `data` buffer.
pub const NV_TRACA_DATA_START: u8 = ItemType::RefPcba as u8;

/// Number of tags. Not a valid tag itself.
pub const TRACABILITY_ITEM_TYPE_MAX: u8 = ItemType::InfoSpareRegion as u8 + 1;

#[derive(
    strum::FromRepr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Copy,
    Clone,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ItemType {
    // dedicated record fields
    Imei = 0,
    BdAddr = 1,
    WifiAddr = 2,
    TestStatus = 3,

    // PCBA production
    RefPcba = 4,
    ShortCode = 5,
    Ics = 6,
    SiteFacPcba = 7,
    LineFacPcba = 8,
    DateProdPcba = 9,
    SnPcba = 10,

    // handset assembly
    IndusRefHandset = 11,
    InfoPtm = 12,
    SiteFacHandset = 13,
    LineFacHandset = 14,
    DateProdHandset = 15,
    SnHandset = 16,

    // mini software
    InfoPtsMini = 17,
    InfoNameMini = 18,
    InfoTechMini = 19,

    // golden sample
    InfoGoldenFlag = 20,
    InfoGoldenDate = 21,

    // handset download test bench
    InfoIdBaieHdtb = 22,
    InfoDatePassHdtb = 23,

    // parametric system test, three passes
    InfoProdBaieParaSys = 24,
    InfoStatusParaSys = 25,
    InfoNbrePassParaSys = 26,
    InfoDatePassParaSys = 27,
    #[strum(to_string = "INFO_PROD_BAIE_PARA_SYS_2")]
    InfoProdBaieParaSys2 = 28,
    #[strum(to_string = "INFO_STATUS_PARA_SYS_2")]
    InfoStatusParaSys2 = 29,
    #[strum(to_string = "INFO_NBRE_PASS_PARA_SYS_2")]
    InfoNbrePassParaSys2 = 30,
    #[strum(to_string = "INFO_DATE_PASS_PARA_SYS_2")]
    InfoDatePassParaSys2 = 31,
    #[strum(to_string = "INFO_PROD_BAIE_PARA_SYS_3")]
    InfoProdBaieParaSys3 = 32,
    #[strum(to_string = "INFO_STATUS_PARA_SYS_3")]
    InfoStatusParaSys3 = 33,
    #[strum(to_string = "INFO_NBRE_PASS_PARA_SYS_3")]
    InfoNbrePassParaSys3 = 34,
    #[strum(to_string = "INFO_DATE_PASS_PARA_SYS_3")]
    InfoDatePassParaSys3 = 35,

    // BW test bench
    InfoProdBaieBw = 36,
    InfoStatusBw = 37,
    InfoNbrePassBw = 38,
    InfoDateBaieBw = 39,

    // GPS test bench
    InfoProdBaieGps = 40,
    InfoStatusGps = 41,
    InfoNbrePassGps = 42,
    InfoDateBaieGps = 43,

    InfoStatusMmiTest = 44,

    // final test, two passes
    InfoProdBaieFinal = 45,
    InfoStatusFinal = 46,
    InfoNbrePassFinal = 47,
    InfoDateBaieFinal = 48,
    #[strum(to_string = "INFO_PROD_BAIE_FINAL_2")]
    InfoProdBaieFinal2 = 49,
    #[strum(to_string = "INFO_STATUS_FINAL_2")]
    InfoStatusFinal2 = 50,
    #[strum(to_string = "INFO_NBRE_PASS_FINAL_2")]
    InfoNbrePassFinal2 = 51,
    #[strum(to_string = "INFO_DATE_BAIE_FINAL_2")]
    InfoDateBaieFinal2 = 52,

    // handset download test
    InfoIdBaieHdt = 53,
    InfoDatePassHdt = 54,

    // commercial reference and personalization
    InfoCommRef = 55,
    InfoPtsAppli = 56,
    InfoNameAppli = 57,
    #[strum(to_string = "INFO_NAME_PERSO1")]
    InfoNamePerso1 = 58,
    #[strum(to_string = "INFO_NAME_PERSO2")]
    InfoNamePerso2 = 59,
    #[strum(to_string = "INFO_NAME_PERSO3")]
    InfoNamePerso3 = 60,
    #[strum(to_string = "INFO_NAME_PERSO4")]
    InfoNamePerso4 = 61,

    // everything left over in `data`
    InfoSpareRegion = 62,
}

const ITEM_COUNT: usize = TRACABILITY_ITEM_TYPE_MAX as usize;

/// Width in bytes of every tag, indexed by discriminant.
const WIDTHS: [usize; ITEM_COUNT] = [
    IMEI_SIZE,
    BD_ADDR_SIZE,
    WIFI_ADDR_SIZE,
    TEST_STATUS_SIZE,
    // PCBA
    12, 4, 2, 1, 1, 3, 4,
    // handset
    12, 2, 1, 1, 3, 4,
    // mini
    3, 20, 3,
    // golden
    1, 3,
    // HDTB
    3, 3,
    // para sys 1..=3
    3, 1, 1, 3,
    3, 1, 1, 3,
    3, 1, 1, 3,
    // BW
    3, 1, 1, 3,
    // GPS
    3, 1, 1, 3,
    // MMI test status
    1,
    // final 1..=2
    3, 1, 1, 3,
    3, 1, 1, 3,
    // HDT
    3, 3,
    // comm ref, appli, perso 1..=4
    15, 3, 20, 20, 20, 20, 20,
    // spare
    245,
];

/// Offset of every data tag inside the `data` buffer, zero for the dedicated fields.
const DATA_OFFSETS: [usize; ITEM_COUNT] = {
    let mut offsets = [0usize; ITEM_COUNT];
    let mut offset = 0;
    let mut i = NV_TRACA_DATA_START as usize;
    while i < ITEM_COUNT {
        offsets[i] = offset;
        offset += WIDTHS[i];
        i += 1;
    }
    offsets
};

const _: () = {
    let last = ItemType::InfoSpareRegion as usize;
    assert!(
        DATA_OFFSETS[last] + WIDTHS[last] == DATA_SIZE,
        "Data tags must cover the data buffer exactly"
    );
    assert!(<ItemType as strum::EnumCount>::COUNT == ITEM_COUNT);
};

impl ItemType {
    /// Returns true for the tags stored in dedicated record fields instead of the `data` buffer.
    pub const fn is_fixed(self) -> bool {
        (self as u8) < NV_TRACA_DATA_START
    }

    /// Width of the field in bytes.
    pub const fn width(self) -> usize {
        WIDTHS[self as usize]
    }

    /// Byte range inside the `data` buffer, `None` for the dedicated fields.
    pub const fn data_range(self) -> Option<Range<usize>> {
        if self.is_fixed() {
            return None;
        }
        let start = DATA_OFFSETS[self as usize];
        Some(start..start + self.width())
    }

    /// Byte range inside the serialized record.
    pub const fn record_range(self) -> Range<usize> {
        let start = match self {
            ItemType::Imei => IMEI_OFFSET,
            ItemType::BdAddr => BD_ADDR_OFFSET,
            ItemType::WifiAddr => WIFI_ADDR_OFFSET,
            ItemType::TestStatus => TEST_STATUS_OFFSET,
            _ => DATA_OFFSET + DATA_OFFSETS[self as usize],
        };
        start..start + self.width()
    }
}

impl From<ItemType> for u8 {
    fn from(val: ItemType) -> Self {
        val as u8
    }
}
