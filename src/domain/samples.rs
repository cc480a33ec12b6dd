// Example records for offline/demo mode and tests

use super::anime::{Anime, AnimeFormat, AnimeStatus};

pub fn attack_on_titan() -> Anime {
    Anime {
        description: Some("Humanity fights for survival against the Titans.".to_string()),
        episodes: Some(75),
        seasons: Some(4),
        status: Some(AnimeStatus::Finished),
        format: Some(AnimeFormat::Tv),
        ..Anime::new(1)
            .with_titles(
                Some("Attack on Titan"),
                Some("Shingeki no Kyojin"),
                Some("進撃の巨人"),
            )
            .with_genres(["Action", "Drama", "Horror"])
    }
}

pub fn demon_slayer() -> Anime {
    Anime {
        description: Some("A boy becomes a demon slayer to save his sister.".to_string()),
        episodes: Some(44),
        seasons: Some(2),
        status: Some(AnimeStatus::Releasing),
        format: Some(AnimeFormat::Tv),
        ..Anime::new(2)
            .with_titles(
                Some("Demon Slayer"),
                Some("Kimetsu no Yaiba"),
                Some("鬼滅の刃"),
            )
            .with_genres(["Action", "Supernatural", "Historical"])
    }
}

pub fn spirited_away() -> Anime {
    Anime {
        description: Some("A young girl enters a world of spirits.".to_string()),
        episodes: Some(1),
        seasons: Some(1),
        status: Some(AnimeStatus::Finished),
        format: Some(AnimeFormat::Movie),
        ..Anime::new(3)
            .with_titles(
                Some("Spirited Away"),
                Some("Sen to Chihiro no Kamikakushi"),
                Some("千と千尋の神隠し"),
            )
            .with_genres(["Adventure", "Supernatural", "Drama"])
    }
}

pub fn sample_catalog() -> Vec<Anime> {
    vec![attack_on_titan(), demon_slayer(), spirited_away()]
}
