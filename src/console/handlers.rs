use crate::{
    engine::Navigator,
    entities::{Bounds, Endpoint, LocationId, LocationRecord, LocationType},
    error::{invalid_input_error, Error},
};

const DEFAULT_NEARBY: usize = 5;

pub const HELP: &str = "\
commands:
  search <text>          filter by name or description (empty clears)
  type <TYPE|all>        filter by location type
  clear                  drop all filters
  list                   show visible locations
  focus <id>             center the map on a location
  details <id>           show location details
  from <id|current>      set the route start
  to <id>                set the route destination
  route                  draw the selected route
  directions <id>        route to a location from here
  unroute                remove the route
  locate                 acquire the current position
  nearby [n]             closest locations to you (default 5)
  within <n,s,e,w>       locations inside a bounding box
  zoom <in|out>          zoom the map
  fullscreen             toggle fullscreen
  selectors              show route selector options
  types                  show known location types
  help                   this text
  quit                   leave";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Search(String),
    Type(Option<LocationType>),
    Clear,
    List,
    Focus(LocationId),
    Details(LocationId),
    From(Option<Endpoint>),
    To(Option<LocationId>),
    Route,
    Directions(LocationId),
    Unroute,
    Locate,
    Nearby(usize),
    Within(Bounds),
    ZoomIn,
    ZoomOut,
    Fullscreen,
    Selectors,
    Types,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();

        let command = match (name.to_lowercase().as_str(), arg) {
            ("search", q) => Command::Search(q.into()),
            ("type", "" | "all") => Command::Type(None),
            ("type", t) => Command::Type(Some(t.into())),
            ("clear", _) => Command::Clear,
            ("list", _) => Command::List,
            ("focus", id) => Command::Focus(parse_id(id)?),
            ("details", id) => Command::Details(parse_id(id)?),
            ("from", "") => Command::From(None),
            ("from", e) => Command::From(Some(e.parse().map_err(|_| invalid_input_error())?)),
            ("to", "") => Command::To(None),
            ("to", id) => Command::To(Some(parse_id(id)?)),
            ("route", _) => Command::Route,
            ("directions", id) => Command::Directions(parse_id(id)?),
            ("unroute", _) => Command::Unroute,
            ("locate", _) => Command::Locate,
            ("nearby", "") => Command::Nearby(DEFAULT_NEARBY),
            ("nearby", n) => Command::Nearby(n.parse().map_err(|_| invalid_input_error())?),
            ("within", b) => Command::Within(parse_bounds(b)?),
            ("zoom", "in") => Command::ZoomIn,
            ("zoom", "out") => Command::ZoomOut,
            ("fullscreen", _) => Command::Fullscreen,
            ("selectors", _) => Command::Selectors,
            ("types", _) => Command::Types,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => return Err(invalid_input_error()),
        };

        Ok(command)
    }
}

fn parse_id(raw: &str) -> Result<LocationId, Error> {
    raw.parse().map_err(|_| invalid_input_error())
}

fn parse_bounds(raw: &str) -> Result<Bounds, Error> {
    let edges = raw
        .split(',')
        .map(|edge| edge.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| invalid_input_error())?;

    match edges[..] {
        [north, south, east, west] if north >= south => Ok(Bounds {
            north,
            south,
            east,
            west,
        }),
        _ => Err(invalid_input_error()),
    }
}

fn summary(record: &LocationRecord) -> String {
    format!(
        "{:>4}  {} [{}]",
        record.id,
        record.name,
        record.location_type.display_name()
    )
}

/// Runs one command and returns the lines to print.
#[tracing::instrument(skip(navigator))]
pub async fn handle(navigator: &mut Navigator, command: Command) -> Result<Vec<String>, Error> {
    let lines = match command {
        Command::Search(query) => {
            navigator.search(&query);
            listing(navigator)
        }
        Command::Type(location_type) => {
            navigator.filter_by_type(location_type);
            listing(navigator)
        }
        Command::Clear => {
            navigator.clear_filters();
            listing(navigator)
        }
        Command::List => listing(navigator),
        Command::Focus(id) => {
            navigator.focus_location(id)?;
            vec![format!("focused on {}", navigator.find_location(id)?.name)]
        }
        Command::Details(id) => {
            let details = navigator.location_details(id)?;
            let mut lines = vec![
                details.title,
                format!("  Type: {}", details.type_label),
                format!("  Coordinates: {}", details.coordinates),
            ];
            if let Some(description) = details.description {
                lines.push(format!("  Description: {}", description));
            }
            lines
        }
        Command::From(endpoint) => {
            navigator.select_route_from(endpoint);
            vec![]
        }
        Command::To(id) => {
            navigator.select_route_to(id);
            vec![]
        }
        Command::Route => {
            let route = navigator.calculate_route()?;
            vec![format!(
                "route {} -> {}",
                String::from(route.from),
                String::from(route.to)
            )]
        }
        Command::Directions(id) => {
            let route = navigator.get_directions_to(id)?;
            vec![format!(
                "route {} -> {}",
                String::from(route.from),
                String::from(route.to)
            )]
        }
        Command::Unroute => {
            navigator.clear_route();
            vec!["route cleared".into()]
        }
        Command::Locate => {
            let here = navigator.locate().await?;
            vec![format!("you are at {}", String::from(here))]
        }
        Command::Nearby(limit) => navigator.nearby(limit)?.into_iter().map(summary).collect(),
        Command::Within(bounds) => records(navigator.within(&bounds)),
        Command::ZoomIn => {
            navigator.zoom_in();
            vec![]
        }
        Command::ZoomOut => {
            navigator.zoom_out();
            vec![]
        }
        Command::Fullscreen => {
            navigator.toggle_fullscreen();
            vec![]
        }
        Command::Selectors => {
            let selectors = navigator.route_selectors();
            let mut lines = vec!["from:".to_string()];
            lines.extend(selectors.from.iter().map(|o| format!("  {:>8}  {}", o.value, o.label)));
            lines.push("to:".into());
            lines.extend(selectors.to.iter().map(|o| format!("  {:>8}  {}", o.value, o.label)));
            lines
        }
        Command::Types => LocationType::all()
            .map(|t| format!("{:<24} {}", t.code(), t.display_name()))
            .collect(),
        Command::Help => HELP.lines().map(String::from).collect(),
        Command::Quit => vec![],
    };

    Ok(lines)
}

fn listing(navigator: &Navigator) -> Vec<String> {
    records(navigator.visible_locations())
}

fn records(found: Vec<&LocationRecord>) -> Vec<String> {
    if found.is_empty() {
        return vec![crate::views::NO_RESULTS.into()];
    }

    found.into_iter().map(summary).collect()
}

#[test]
fn parses_commands() {
    assert_eq!("search  great hall ".parse::<Command>(), Ok(Command::Search("great hall".into())));
    assert_eq!("search".parse::<Command>(), Ok(Command::Search("".into())));
    assert_eq!(
        "type residential_hall".parse::<Command>(),
        Ok(Command::Type(Some(LocationType::ResidentialHall)))
    );
    assert_eq!("type all".parse::<Command>(), Ok(Command::Type(None)));
    assert_eq!("from current".parse::<Command>(), Ok(Command::From(Some(Endpoint::Current))));
    assert_eq!("to 8".parse::<Command>(), Ok(Command::To(Some(8))));
    assert_eq!("ZOOM in".parse::<Command>(), Ok(Command::ZoomIn));
    assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    assert_eq!("nearby".parse::<Command>(), Ok(Command::Nearby(5)));
    assert_eq!("nearby 2".parse::<Command>(), Ok(Command::Nearby(2)));
    assert_eq!(
        "within 5.66, 5.6495, -0.18, -0.2".parse::<Command>(),
        Ok(Command::Within(Bounds {
            north: 5.66,
            south: 5.6495,
            east: -0.18,
            west: -0.2,
        }))
    );
}

#[test]
fn rejects_malformed_commands() {
    assert_eq!("focus library".parse::<Command>(), Err(invalid_input_error()));
    assert_eq!("zoom sideways".parse::<Command>(), Err(invalid_input_error()));
    assert_eq!("teleport 3".parse::<Command>(), Err(invalid_input_error()));
    assert_eq!("nearby some".parse::<Command>(), Err(invalid_input_error()));
    assert_eq!("within 5.66,5.64".parse::<Command>(), Err(invalid_input_error()));
    assert_eq!("within 5.6,5.7,-0.1,-0.2".parse::<Command>(), Err(invalid_input_error()));
}

#[tokio::test]
async fn search_lists_matches() {
    let (mut navigator, _) = crate::engine::fakes::started_navigator().await;

    let lines = handle(&mut navigator, Command::Search("hall".into())).await.unwrap();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Great Hall"));
    assert!(lines[2].contains("Volta Hall [Residential Hall]"));
}

#[tokio::test]
async fn route_errors_surface_to_caller() {
    let (mut navigator, _) = crate::engine::fakes::started_navigator().await;

    handle(&mut navigator, Command::From(Some(Endpoint::Current))).await.unwrap();
    handle(&mut navigator, Command::To(Some(3))).await.unwrap();
    let err = handle(&mut navigator, Command::Route).await.unwrap_err();

    assert_eq!(
        err.notice(),
        "Current location not available. Please enable location services."
    );
}

#[tokio::test]
async fn within_lists_boxed_locations() {
    let (mut navigator, _) = crate::engine::fakes::started_navigator().await;

    let command = "within 5.66,5.6495,-0.18,-0.2".parse::<Command>().unwrap();
    let lines = handle(&mut navigator, command).await.unwrap();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("   4"));
    assert!(lines[1].starts_with("   6"));
}

#[tokio::test]
async fn nearby_without_fix_reports_notice() {
    let (mut navigator, _) = crate::engine::fakes::started_navigator().await;

    let err = handle(&mut navigator, Command::Nearby(3)).await.unwrap_err();

    assert_eq!(
        err.notice(),
        "Current location not available. Please enable location services."
    );
}
