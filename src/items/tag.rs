//! Skip Tags

catalog! {
    /// Tag awarded for skipping a blind.
    pub enum Tag: u8 {
        Uncommon => "Uncommon Tag",
        Rare => "Rare Tag",
        Negative => "Negative Tag",
        Foil => "Foil Tag",
        Holographic => "Holographic Tag",
        Polychrome => "Polychrome Tag",
        Investment => "Investment Tag",
        Voucher => "Voucher Tag",
        Boss => "Boss Tag",
        Standard => "Standard Tag",
        Charm => "Charm Tag",
        Meteor => "Meteor Tag",
        Buffoon => "Buffoon Tag",
        Handy => "Handy Tag",
        Garbage => "Garbage Tag",
        Ethereal => "Ethereal Tag",
        Coupon => "Coupon Tag",
        Double => "Double Tag",
        Juggle => "Juggle Tag",
        D6 => "D6 Tag",
        TopUp => "Top-up Tag",
        Speed => "Speed Tag",
        Orbital => "Orbital Tag",
        Economy => "Economy Tag",
    }
}
