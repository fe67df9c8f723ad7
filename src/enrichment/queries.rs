//! GraphQL documents used for enrichment.

/// Card detail query, keyed by `$cardSlug`
pub const CARD_DETAILS_QUERY: &str = r#"query GetCardDetails($cardSlug: String!) {
  anyCard(slug: $cardSlug) {
    rarityTyped
    grade
    xp
    xpNeededForNextGrade
    liveSingleSaleOffer { receiverSide { amounts { eurCents usdCents gbpCents wei referenceCurrency } } }
    ... on Card {
      pictureUrl
      season { startYear }
      inSeasonEligible
      player {
        slug
        displayName
        position
        lastFiveSo5Appearances
        lastFifteenSo5Appearances
        playerGameScores(last: 15, lowCoverage: true) { score }
        activeInjuries { status expectedEndDate }
        activeSuspensions { reason matches endDate competition { displayName } }
        activeClub {
          name
          upcomingGames(first: 1) {
            id
            date
            competition { displayName }
            homeTeam { ... on TeamInterface { name } }
            awayTeam { ... on TeamInterface { name } }
          }
        }
        u23Eligible
      }
    }
  }
}"#;

/// Six floor prices for one player, keyed by `$playerSlug`
///
/// Aliases encode rarity and season state: `L`/`R`/`SR` for limited, rare
/// and super rare; `_IN` for in-season, `_ANY` for classic.
pub const FLOOR_PRICES_QUERY: &str = r#"query GetSinglePlayerFloorPrices($playerSlug: String!) {
  football {
    player(slug: $playerSlug) {
      L_IN: lowestPriceAnyCard(rarity: limited, inSeason: true) { ...FloorOffer }
      L_ANY: lowestPriceAnyCard(rarity: limited, inSeason: false) { ...FloorOffer }
      R_IN: lowestPriceAnyCard(rarity: rare, inSeason: true) { ...FloorOffer }
      R_ANY: lowestPriceAnyCard(rarity: rare, inSeason: false) { ...FloorOffer }
      SR_IN: lowestPriceAnyCard(rarity: super_rare, inSeason: true) { ...FloorOffer }
      SR_ANY: lowestPriceAnyCard(rarity: super_rare, inSeason: false) { ...FloorOffer }
    }
  }
}

fragment FloorOffer on Card {
  liveSingleSaleOffer { receiverSide { amounts { eurCents usdCents gbpCents wei referenceCurrency } } }
}"#;
