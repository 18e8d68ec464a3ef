//! Jokers
//!
//! The 150 jokers in rarity order, plus the rarity tiers and the sticker
//! rules that depend on the joker drawn.

use serde::{Deserialize, Serialize};

use super::card::Edition;

catalog! {
    /// Joker, ordered by rarity tier then by the game's pool order.
    pub enum Joker: u8 {
        // Common (0-60)
        Joker => "Joker",
        GreedyJoker => "Greedy Joker",
        LustyJoker => "Lusty Joker",
        WrathfulJoker => "Wrathful Joker",
        GluttonousJoker => "Gluttonous Joker",
        JollyJoker => "Jolly Joker",
        ZanyJoker => "Zany Joker",
        MadJoker => "Mad Joker",
        CrazyJoker => "Crazy Joker",
        DrollJoker => "Droll Joker",
        SlyJoker => "Sly Joker",
        WilyJoker => "Wily Joker",
        CleverJoker => "Clever Joker",
        DeviousJoker => "Devious Joker",
        CraftyJoker => "Crafty Joker",
        HalfJoker => "Half Joker",
        CreditCard => "Credit Card",
        Banner => "Banner",
        MysticSummit => "Mystic Summit",
        EightBall => "Eight Ball",
        Misprint => "Misprint",
        RaisedFist => "Raised Fist",
        ChaosTheClown => "Chaos the Clown",
        ScaryFace => "Scary Face",
        AbstractJoker => "Abstract Joker",
        DelayedGratification => "Delayed Gratification",
        GrosMichel => "Gros Michel",
        EvenSteven => "Even Steven",
        OddTodd => "Odd Todd",
        Scholar => "Scholar",
        BusinessCard => "Business Card",
        Supernova => "Supernova",
        RideTheBus => "Ride the Bus",
        Egg => "Egg",
        Runner => "Runner",
        IceCream => "Ice Cream",
        Splash => "Splash",
        BlueJoker => "Blue Joker",
        FacelessJoker => "Faceless Joker",
        GreenJoker => "Green Joker",
        Superposition => "Superposition",
        ToDoList => "To Do List",
        Cavendish => "Cavendish",
        RedCard => "Red Card",
        SquareJoker => "Square Joker",
        RiffRaff => "Riff-Raff",
        Photograph => "Photograph",
        ReservedParking => "Reserved Parking",
        MailInRebate => "Mail-In Rebate",
        Hallucination => "Hallucination",
        FortuneTeller => "Fortune Teller",
        Juggler => "Juggler",
        Drunkard => "Drunkard",
        GoldenJoker => "Golden Joker",
        Popcorn => "Popcorn",
        WalkieTalkie => "Walkie Talkie",
        SmileyFace => "Smiley Face",
        GoldenTicket => "Golden Ticket",
        Swashbuckler => "Swashbuckler",
        HangingChad => "Hanging Chad",
        ShootTheMoon => "Shoot the Moon",
        // Uncommon (61-124)
        JokerStencil => "Joker Stencil",
        FourFingers => "Four Fingers",
        Mime => "Mime",
        CeremonialDagger => "Ceremonial Dagger",
        MarbleJoker => "Marble Joker",
        LoyaltyCard => "Loyalty Card",
        Dusk => "Dusk",
        Fibonacci => "Fibonacci",
        SteelJoker => "Steel Joker",
        Hack => "Hack",
        Pareidolia => "Pareidolia",
        SpaceJoker => "Space Joker",
        Burglar => "Burglar",
        Blackboard => "Blackboard",
        SixthSense => "Sixth Sense",
        Constellation => "Constellation",
        Hiker => "Hiker",
        CardSharp => "Card Sharp",
        Madness => "Madness",
        Seance => "Seance",
        Vampire => "Vampire",
        Shortcut => "Shortcut",
        Hologram => "Hologram",
        Cloud9 => "Cloud 9",
        Rocket => "Rocket",
        MidasMask => "Midas Mask",
        Luchador => "Luchador",
        GiftCard => "Gift Card",
        TurtleBean => "Turtle Bean",
        Erosion => "Erosion",
        ToTheMoon => "To the Moon",
        StoneJoker => "Stone Joker",
        LuckyCat => "Lucky Cat",
        Bull => "Bull",
        DietCola => "Diet Cola",
        TradingCard => "Trading Card",
        FlashCard => "Flash Card",
        SpareTrousers => "Spare Trousers",
        Ramen => "Ramen",
        Seltzer => "Seltzer",
        Castle => "Castle",
        MrBones => "Mr. Bones",
        Acrobat => "Acrobat",
        SockAndBuskin => "Sock and Buskin",
        Troubadour => "Troubadour",
        Certificate => "Certificate",
        SmearedJoker => "Smeared Joker",
        Throwback => "Throwback",
        RoughGem => "Rough Gem",
        Bloodstone => "Bloodstone",
        Arrowhead => "Arrowhead",
        OnyxAgate => "Onyx Agate",
        GlassJoker => "Glass Joker",
        Showman => "Showman",
        FlowerPot => "Flower Pot",
        MerryAndy => "Merry Andy",
        OopsAll6s => "Oops! All 6s",
        TheIdol => "The Idol",
        SeeingDouble => "Seeing Double",
        Matador => "Matador",
        Satellite => "Satellite",
        Cartomancer => "Cartomancer",
        Astronomer => "Astronomer",
        Bootstraps => "Bootstraps",
        // Rare (125-144)
        Dna => "DNA",
        Vagabond => "Vagabond",
        Baron => "Baron",
        Obelisk => "Obelisk",
        BaseballCard => "Baseball Card",
        AncientJoker => "Ancient Joker",
        Campfire => "Campfire",
        Blueprint => "Blueprint",
        WeeJoker => "Wee Joker",
        HitTheRoad => "Hit the Road",
        TheDuo => "The Duo",
        TheTrio => "The Trio",
        TheFamily => "The Family",
        TheOrder => "The Order",
        TheTribe => "The Tribe",
        Stuntman => "Stuntman",
        InvisibleJoker => "Invisible Joker",
        Brainstorm => "Brainstorm",
        DriversLicense => "Drivers License",
        BurntJoker => "Burnt Joker",
        // Legendary (145-149)
        Canio => "Canio",
        Triboulet => "Triboulet",
        Yorick => "Yorick",
        Chicot => "Chicot",
        Perkeo => "Perkeo",

    }
}

/// First ordinal of each rarity tier, plus the end of the catalog.
const TIER_STARTS: [usize; 5] = [0, 61, 125, 145, 150];

/// Jokers that never roll the eternal sticker.
pub const ETERNAL_EXCLUDED: [Joker; 11] = [
    Joker::GrosMichel,
    Joker::IceCream,
    Joker::Cavendish,
    Joker::Luchador,
    Joker::TurtleBean,
    Joker::DietCola,
    Joker::Popcorn,
    Joker::Ramen,
    Joker::Seltzer,
    Joker::MrBones,
    Joker::InvisibleJoker,
];

/// Jokers that never roll the perishable sticker.
pub const PERISHABLE_EXCLUDED: [Joker; 16] = [
    Joker::CeremonialDagger,
    Joker::RideTheBus,
    Joker::Runner,
    Joker::Constellation,
    Joker::GreenJoker,
    Joker::RedCard,
    Joker::Madness,
    Joker::SquareJoker,
    Joker::Vampire,
    Joker::Rocket,
    Joker::Obelisk,
    Joker::LuckyCat,
    Joker::FlashCard,
    Joker::SpareTrousers,
    Joker::Castle,
    Joker::WeeJoker,
];

impl Joker {
    /// Rarity tier this joker belongs to.
    pub fn rarity(self) -> Rarity {
        match self.index() {
            i if i < TIER_STARTS[1] => Rarity::Common,
            i if i < TIER_STARTS[2] => Rarity::Uncommon,
            i if i < TIER_STARTS[3] => Rarity::Rare,
            _ => Rarity::Legendary,
        }
    }

    /// Whether the eternal sticker may be applied.
    pub fn can_be_eternal(self) -> bool {
        !ETERNAL_EXCLUDED.contains(&self)
    }

    /// Whether the perishable sticker may be applied.
    pub fn can_be_perishable(self) -> bool {
        !PERISHABLE_EXCLUDED.contains(&self)
    }
}

// =============================================================================
// RARITY
// =============================================================================

/// Joker rarity tier (1-4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rarity {
    /// Tier 1
    Common = 1,
    /// Tier 2
    Uncommon = 2,
    /// Tier 3
    Rare = 3,
    /// Tier 4, only from The Soul
    Legendary = 4,
}

impl Rarity {
    /// Jokers of this tier, in pool order.
    pub fn pool(self) -> &'static [Joker] {
        let tier = self as usize;
        &Joker::ALL[TIER_STARTS[tier - 1]..TIER_STARTS[tier]]
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }
}

// =============================================================================
// GENERATED JOKER
// =============================================================================

/// Stickers rolled onto a joker at higher stakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JokerStickers {
    /// Cannot be sold or destroyed.
    pub eternal: bool,
    /// Debuffed after 5 rounds.
    pub perishable: bool,
    /// Costs $3 per round.
    pub rental: bool,
}

impl JokerStickers {
    /// True when no sticker was rolled.
    pub fn is_empty(&self) -> bool {
        !(self.eternal || self.perishable || self.rental)
    }
}

/// A generated joker with its rolled attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JokerData {
    /// The joker drawn.
    pub joker: Joker,
    /// Tier it was drawn from.
    pub rarity: Rarity,
    /// Rolled edition.
    pub edition: Edition,
    /// Rolled stickers.
    pub stickers: JokerStickers,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_sizes() {
        assert_eq!(Rarity::Common.pool().len(), 61);
        assert_eq!(Rarity::Uncommon.pool().len(), 64);
        assert_eq!(Rarity::Rare.pool().len(), 20);
        assert_eq!(Rarity::Legendary.pool().len(), 5);
    }

    #[test]
    fn test_pool_boundaries() {
        assert_eq!(Rarity::Common.pool().last(), Some(&Joker::ShootTheMoon));
        assert_eq!(Rarity::Uncommon.pool().first(), Some(&Joker::JokerStencil));
        assert_eq!(Rarity::Uncommon.pool().last(), Some(&Joker::Bootstraps));
        assert_eq!(Rarity::Rare.pool().first(), Some(&Joker::Dna));
        assert_eq!(
            Rarity::Legendary.pool(),
            &[Joker::Canio, Joker::Triboulet, Joker::Yorick, Joker::Chicot, Joker::Perkeo]
        );
    }

    #[test]
    fn test_rarity_of_joker() {
        assert_eq!(Joker::Joker.rarity(), Rarity::Common);
        assert_eq!(Joker::Blueprint.rarity(), Rarity::Rare);
        assert_eq!(Joker::Perkeo.rarity(), Rarity::Legendary);
        for rarity in [Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Legendary] {
            assert!(rarity.pool().iter().all(|j| j.rarity() == rarity));
        }
    }

    #[test]
    fn test_sticker_exclusions() {
        assert!(!Joker::GrosMichel.can_be_eternal());
        assert!(Joker::GrosMichel.can_be_perishable());
        assert!(!Joker::WeeJoker.can_be_perishable());
        assert!(Joker::Blueprint.can_be_eternal());
    }

    #[test]
    fn test_stickers_empty() {
        assert!(JokerStickers::default().is_empty());
        let rental = JokerStickers { rental: true, ..Default::default() };
        assert!(!rental.is_empty());
    }
}
