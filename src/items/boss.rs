//! Boss Blinds
//!
//! Showdown bosses (the five whose names don't start with "The") only
//! appear on every eighth ante; the rest fill every other ante.

catalog! {
    /// Boss blind, in the game's pool order.
    pub enum Boss: u8 {
        TheArm => "The Arm",
        TheClub => "The Club",
        TheEye => "The Eye",
        AmberAcorn => "Amber Acorn",
        CeruleanBell => "Cerulean Bell",
        CrimsonHeart => "Crimson Heart",
        VerdantLeaf => "Verdant Leaf",
        VioletVessel => "Violet Vessel",
        TheFish => "The Fish",
        TheFlint => "The Flint",
        TheGoad => "The Goad",
        TheHead => "The Head",
        TheHook => "The Hook",
        TheHouse => "The House",
        TheManacle => "The Manacle",
        TheMark => "The Mark",
        TheMouth => "The Mouth",
        TheNeedle => "The Needle",
        TheOx => "The Ox",
        ThePillar => "The Pillar",
        ThePlant => "The Plant",
        ThePsychic => "The Psychic",
        TheSerpent => "The Serpent",
        TheTooth => "The Tooth",
        TheWall => "The Wall",
        TheWater => "The Water",
        TheWheel => "The Wheel",
        TheWindow => "The Window",
    }
}

impl Boss {
    /// Finisher boss of an eighth ante.
    pub fn is_showdown(self) -> bool {
        !self.name().starts_with('T')
    }

    /// Whether this boss may be drawn at `ante`.
    pub fn eligible_at(self, ante: u32) -> bool {
        self.is_showdown() == ante.is_multiple_of(8)
    }
}
