use moviedb_core::catalog::{Actor, Award, CatalogItem, Movie, MovieCast};

fn actor(id: &str, name: &str, bio: &str, birth_date: &str) -> CatalogItem {
    CatalogItem::Actor(Actor {
        id: id.to_string(),
        name: name.to_string(),
        bio: Some(bio.to_string()),
        birth_date: Some(birth_date.to_string()),
    })
}

fn cast(
    movie_id: &str,
    actor_id: &str,
    actor_name: &str,
    role_name: &str,
    role_description: &str,
) -> CatalogItem {
    CatalogItem::MovieCast(MovieCast {
        movie_id: movie_id.to_string(),
        actor_id: actor_id.to_string(),
        actor_name: actor_name.to_string(),
        role_name: role_name.to_string(),
        role_description: Some(role_description.to_string()),
    })
}

fn award(subject_id: &str, award_body: &str, category: &str, year: i32) -> CatalogItem {
    CatalogItem::Award(Award {
        subject_id: subject_id.to_string(),
        award_body: award_body.to_string(),
        category: category.to_string(),
        year: Some(year),
    })
}

/// Demo catalog preloaded into the in-memory store: three movies with
/// their cast, the actors and a handful of awards.
pub fn demo_catalog() -> Vec<CatalogItem> {
    vec![
        Movie::new("1000", "The Shawshank Redemption")
            .with_release_date("1994-09-22")
            .with_overview(
                "Two imprisoned men bond over a number of years, finding solace and eventual \
                 redemption through acts of common decency.",
            )
            .into(),
        Movie::new("1001", "The Godfather")
            .with_release_date("1972-03-24")
            .with_overview(
                "The aging patriarch of an organized crime dynasty transfers control of his \
                 clandestine empire to his reluctant son.",
            )
            .into(),
        Movie::new("1002", "The Dark Knight")
            .with_release_date("2008-07-18")
            .with_overview(
                "When the menace known as the Joker emerges from his mysterious past, he wreaks \
                 havoc and chaos on the people of Gotham.",
            )
            .into(),
        actor(
            "2000",
            "Morgan Freeman",
            "An American actor, director, and narrator known for his distinctive deep voice.",
            "1937-06-01",
        ),
        actor(
            "2001",
            "Tim Robbins",
            "An American actor, screenwriter, director, producer, and musician.",
            "1958-10-16",
        ),
        actor(
            "2100",
            "Marlon Brando",
            "An American actor and film director regarded as one of the greatest actors of all time.",
            "1924-04-03",
        ),
        actor(
            "2101",
            "Al Pacino",
            "An American actor and filmmaker known for his intense and charismatic performances.",
            "1940-04-25",
        ),
        actor(
            "2102",
            "James Caan",
            "An American actor known for his roles in classic films.",
            "1940-03-26",
        ),
        actor(
            "2200",
            "Christian Bale",
            "An English actor known for his versatility and intense method acting.",
            "1974-01-30",
        ),
        actor(
            "2201",
            "Heath Ledger",
            "An Australian actor and music video director known for his diverse roles.",
            "1979-04-04",
        ),
        cast(
            "1000",
            "2000",
            "Morgan Freeman",
            "Ellis Boyd 'Red' Redding",
            "A long-term inmate who becomes the best friend of Andy Dufresne.",
        ),
        cast(
            "1000",
            "2001",
            "Tim Robbins",
            "Andy Dufresne",
            "A banker sentenced to life in Shawshank State Penitentiary.",
        ),
        cast(
            "1001",
            "2100",
            "Marlon Brando",
            "Vito Corleone",
            "The aging patriarch of the Corleone crime family.",
        ),
        cast(
            "1001",
            "2101",
            "Al Pacino",
            "Michael Corleone",
            "The youngest son of Vito Corleone, who becomes the new Godfather.",
        ),
        cast(
            "1001",
            "2102",
            "James Caan",
            "Sonny Corleone",
            "The hot-headed eldest son of Vito Corleone.",
        ),
        cast(
            "1002",
            "2200",
            "Christian Bale",
            "Bruce Wayne / Batman",
            "A billionaire who fights crime as the masked vigilante Batman.",
        ),
        cast(
            "1002",
            "2201",
            "Heath Ledger",
            "Joker",
            "The arch-nemesis of Batman, known for his chaotic and sadistic nature.",
        ),
        award("1000", "Academy", "Best Picture", 1995),
        award("1000", "CFCA", "Best Picture", 1995),
        award("1001", "Academy", "Best Picture", 1973),
        award("1001", "Golden Globe", "Best Motion Picture - Drama", 1973),
        award(
            "2100",
            "Golden Globe",
            "Best Actor in a Motion Picture - Drama",
            1973,
        ),
        award("2102", "Academy", "Best Supporting Actor", 1973),
        award("2201", "BAFTA", "Best Supporting Actor", 2009),
        award("2201", "Academy", "Best Supporting Actor", 2009),
    ]
}
