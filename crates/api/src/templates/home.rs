use maud::{html, Markup, DOCTYPE};

/// Landing page listing the available API routes.
pub fn home_page(api_base: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Climate Observation API" }
            }
            body {
                section {
                    h1 { "Climate Observation API" }
                    p { "Available Routes:" }
                    ul {
                        li {
                            a href=(format!("{}/api/v1.0/precipitation", api_base)) {
                                "/api/v1.0/precipitation"
                            }
                        }
                        li {
                            a href=(format!("{}/api/v1.0/stations", api_base)) {
                                "/api/v1.0/stations"
                            }
                        }
                        li {
                            a href=(format!("{}/api/v1.0/tobs", api_base)) {
                                "/api/v1.0/tobs"
                            }
                        }
                        li { "/api/v1.0/<start>" }
                        li { "/api/v1.0/<start>/<end>" }
                    }
                    p {
                        a href=(format!("{}/docs", api_base)) { "API Docs" }
                    }
                }
            }
        }
    }
}
