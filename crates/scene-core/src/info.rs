//! Static descriptive records for each equipment unit.
//!
//! The text is the Indonesian-language educational content shown in the info
//! panel; it is immutable and handed to the selection callback by reference.

use crate::layout::EquipmentId;

#[derive(Debug, PartialEq, Eq)]
pub struct EquipmentInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub function: &'static str,
    pub specs: &'static str,
}

static FEED_TANK: EquipmentInfo = EquipmentInfo {
    name: "Feed Tank",
    description: "Tangki penyimpanan oli bekas yang akan diproses melalui pirolisis.",
    function: "Menyimpan dan menyediakan umpan oli bekas ke dalam reaktor.",
    specs: "Kapasitas 200 liter, dilengkapi dengan pengaduk dan pemanas awal.",
};

static REACTOR: EquipmentInfo = EquipmentInfo {
    name: "Reaktor Pirolisis",
    description: "Tempat proses pirolisis terjadi dengan pemanasan dan dekomposisi termal \
                  pada suhu tinggi (400-600\u{b0}C).",
    function: "Mengkonversi oli bekas menjadi uap hidrokarbon melalui dekomposisi termal \
               tanpa kehadiran oksigen.",
    specs: "Reaktor stainless steel dengan kapasitas 100 liter, pemanas eksternal hingga \
            600\u{b0}C, dilengkapi sensor suhu dan tekanan.",
};

static CONDENSER: EquipmentInfo = EquipmentInfo {
    name: "Kondenser",
    description: "Alat penukar panas untuk mengubah uap hidrokarbon menjadi cairan.",
    function: "Mendinginkan uap hasil pirolisis sehingga terkondensasi menjadi cairan.",
    specs: "Shell and tube heat exchanger dengan media pendingin air, kapasitas \
            pendinginan 10 kW.",
};

static SEPARATION_TANK: EquipmentInfo = EquipmentInfo {
    name: "Tangki Pemisah",
    description: "Memisahkan fase cair dan gas dari hasil kondensasi.",
    function: "Memisahkan produk menjadi fraksi cair (minyak) dan gas yang tidak \
               terkondensasi.",
    specs: "Kapasitas 100 liter, dilengkapi dengan katup pemisah dan sensor level.",
};

static GAS_TANK: EquipmentInfo = EquipmentInfo {
    name: "Tangki Gas",
    description: "Menampung gas hasil proses pirolisis yang tidak terkondensasi.",
    function: "Menyimpan gas hidrokarbon ringan yang dapat digunakan sebagai bahan bakar.",
    specs: "Kapasitas 50 liter, tekanan maksimal 10 bar, dilengkapi pressure relief valve.",
};

static OIL_TANK: EquipmentInfo = EquipmentInfo {
    name: "Tangki Minyak",
    description: "Menampung produk minyak hasil pirolisis.",
    function: "Menyimpan minyak pirolisis yang dapat digunakan sebagai bahan bakar \
               alternatif.",
    specs: "Kapasitas 150 liter, dilengkapi dengan pompa transfer dan filter.",
};

static CONTROL_PANEL: EquipmentInfo = EquipmentInfo {
    name: "Panel Kontrol",
    description: "Sistem kontrol dan monitoring seluruh proses pirolisis.",
    function: "Mengatur dan memantau parameter proses seperti suhu, tekanan, dan aliran.",
    specs: "PLC-based control system dengan HMI touchscreen, data logging dan alarm system.",
};

/// The 1:1 info record for an equipment unit.
pub fn equipment_info(id: EquipmentId) -> &'static EquipmentInfo {
    match id {
        EquipmentId::FeedTank => &FEED_TANK,
        EquipmentId::Reactor => &REACTOR,
        EquipmentId::Condenser => &CONDENSER,
        EquipmentId::SeparationTank => &SEPARATION_TANK,
        EquipmentId::GasTank => &GAS_TANK,
        EquipmentId::OilTank => &OIL_TANK,
        EquipmentId::ControlPanel => &CONTROL_PANEL,
    }
}
