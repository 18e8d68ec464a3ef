//! Vouchers
//!
//! Vouchers come in pairs: every even ordinal is a base voucher and the
//! entry after it is its upgrade, which only becomes available once the
//! base voucher has been redeemed.

catalog! {
    /// Voucher, base and upgrade interleaved.
    pub enum Voucher: u8 {
        Overstock => "Overstock",
        OverstockPlus => "Overstock Plus",
        ClearanceSale => "Clearance Sale",
        Liquidation => "Liquidation",
        Hone => "Hone",
        GlowUp => "Glow Up",
        RerollSurplus => "Reroll Surplus",
        RerollGlut => "Reroll Glut",
        CrystalBall => "Crystal Ball",
        OmenGlobe => "Omen Globe",
        Telescope => "Telescope",
        Observatory => "Observatory",
        Grabber => "Grabber",
        NachoTong => "Nacho Tong",
        Wasteful => "Wasteful",
        Recyclomancy => "Recyclomancy",
        TarotMerchant => "Tarot Merchant",
        TarotTycoon => "Tarot Tycoon",
        PlanetMerchant => "Planet Merchant",
        PlanetTycoon => "Planet Tycoon",
        SeedMoney => "Seed Money",
        MoneyTree => "Money Tree",
        Blank => "Blank",
        Antimatter => "Antimatter",
        MagicTrick => "Magic Trick",
        Illusion => "Illusion",
        Hieroglyph => "Hieroglyph",
        Petroglyph => "Petroglyph",
        DirectorsCut => "Director's Cut",
        Retcon => "Retcon",
        PaintBrush => "Paint Brush",
        Palette => "Palette",
    }
}

impl Voucher {
    /// True for the first voucher of a pair.
    pub fn is_base(self) -> bool {
        self.index() % 2 == 0
    }

    /// The upgrade unlocked by redeeming this voucher.
    pub fn upgrade(self) -> Option<Voucher> {
        if self.is_base() {
            Voucher::from_index(self.index() + 1)
        } else {
            None
        }
    }

    /// The voucher that must be redeemed before this one.
    pub fn prerequisite(self) -> Option<Voucher> {
        if self.is_base() {
            None
        } else {
            Voucher::from_index(self.index() - 1)
        }
    }

    /// The 16 upgrade vouchers.
    pub fn upgrades() -> impl Iterator<Item = Voucher> {
        Voucher::ALL.iter().copied().filter(|v| !v.is_base())
    }
}
