#[cfg(test)]
mod tests {
    use crate::catalog::tests::common::{raw_pokemon, FakeSource};
    use crate::catalog::PokemonAggregator;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kanto() -> PokemonAggregator<FakeSource> {
        let mut source = FakeSource::new()
            .with_item(raw_pokemon(1, "bulbasaur", "grass", 45))
            .with_item(raw_pokemon(4, "charmander", "fire", 39))
            .with_item(raw_pokemon(5, "charmeleon", "fire", 58))
            .with_item(raw_pokemon(25, "pikachu", "electric", 35));
        // padding pushes one charizard beyond the first-generation window
        for id in 1000..1200 {
            source = source.with_item(raw_pokemon(id, "filler", "normal", 1));
        }
        PokemonAggregator::new(source.with_item(raw_pokemon(6, "charizard", "fire", 78)))
    }

    fn names(pokemons: &[schema::Pokemon]) -> Vec<&str> {
        pokemons.iter().map(|p| p.name.as_str()).collect()
    }

    #[rstest]
    #[case::substring("char", vec!["charmander", "charmeleon"])]
    #[case::case_insensitive("  PIKA ", vec!["pikachu"])]
    #[case::no_match("mew", vec![])]
    #[tokio::test]
    async fn test_search_by_name_within_window(#[case] term: &str, #[case] expected: Vec<&str>) {
        let aggregator = kanto();
        let found = aggregator.search(term).await.unwrap();
        assert_eq!(names(&found), expected);
    }

    #[tokio::test]
    async fn test_search_by_id() {
        let aggregator = kanto();
        let found = aggregator.search("25").await.unwrap();
        assert_eq!(names(&found), vec!["pikachu"]);
        assert_eq!(aggregator.source().detail_calls(), 1);
    }

    #[rstest]
    #[case::trailing_letters("25abc")]
    #[case::decimal("25.9")]
    #[tokio::test]
    async fn test_search_number_prefix_looks_up_id(#[case] term: &str) {
        let aggregator = kanto();
        let found = aggregator.search(term).await.unwrap();
        assert_eq!(names(&found), vec!["pikachu"]);
        assert_eq!(aggregator.source().detail_calls(), 1);
    }

    #[tokio::test]
    async fn test_search_out_of_range_number_is_empty() {
        let aggregator = kanto();
        assert!(aggregator.search("99999999999").await.unwrap().is_empty());
        assert_eq!(aggregator.source().detail_calls(), 0);
    }

    #[tokio::test]
    async fn test_search_unknown_id_is_empty_not_an_error() {
        let aggregator = kanto();
        let found = aggregator.search("9999").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_offers_first_fifty() {
        let aggregator = kanto();
        let found = aggregator.search("   ").await.unwrap();
        assert_eq!(found.len(), 50);
        assert_eq!(
            names(&found)[..4].to_vec(),
            vec!["bulbasaur", "charmander", "charmeleon", "pikachu"]
        );
    }
}
