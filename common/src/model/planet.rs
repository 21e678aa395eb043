use crate::model::card::Sector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    pub sector: Sector,
    // Percentage position on the galaxy map
    pub x: f32,
    pub y: f32,
}

const fn p(name: &'static str, sector: Sector, x: f32, y: f32) -> Planet {
    Planet { name, sector, x, y }
}

// Used for planets the catalog doesn't know about
pub const MAP_CENTER: (f32, f32) = (50.0, 50.0);

pub const PLANETS: [Planet; 48] = [
    // Orion
    p("Kepler Prime", Sector::Blue, 10.0, 35.0),
    p("Zenith Station", Sector::Blue, 15.0, 30.0),
    p("Cryos", Sector::Blue, 20.0, 28.0),
    p("Titan City", Sector::Blue, 24.0, 33.0),
    p("Command Central", Sector::Blue, 22.0, 38.0),
    p("Nova Haven", Sector::Blue, 18.0, 40.0),
    p("Avalon", Sector::Blue, 42.0, 28.0),
    p("Solara", Sector::Blue, 45.0, 32.0),
    p("Lumina", Sector::Blue, 48.0, 30.0),
    p("Forge World", Sector::Blue, 50.0, 27.0),
    p("Crystallis", Sector::Blue, 52.0, 33.0),
    p("Polaris", Sector::Blue, 55.0, 26.0),
    // Hydra
    p("Star Harbor", Sector::Yellow, 12.0, 45.0),
    p("Azteca Prime", Sector::Yellow, 16.0, 50.0),
    p("Coral Station", Sector::Yellow, 20.0, 48.0),
    p("Emerald Ridge", Sector::Yellow, 22.0, 55.0),
    p("Condor Peak", Sector::Yellow, 18.0, 58.0),
    p("Sierra Nova", Sector::Yellow, 22.0, 62.0),
    p("Pampas Prime", Sector::Yellow, 26.0, 65.0),
    p("Amazon Station", Sector::Yellow, 28.0, 60.0),
    p("Savanna Prime", Sector::Yellow, 45.0, 50.0),
    p("Oasis Station", Sector::Yellow, 50.0, 48.0),
    p("Congo Nexus", Sector::Yellow, 48.0, 56.0),
    p("Diamond World", Sector::Yellow, 52.0, 60.0),
    // Nebula
    p("Atlas Base", Sector::Black, 47.0, 40.0),
    p("Pyramid Station", Sector::Black, 52.0, 42.0),
    p("Crossroads Prime", Sector::Black, 55.0, 38.0),
    p("Crimson Reach", Sector::Black, 58.0, 40.0),
    p("Persia Nova", Sector::Black, 60.0, 42.0),
    p("Babylon Station", Sector::Black, 58.0, 45.0),
    p("Dune World", Sector::Black, 62.0, 48.0),
    p("Indus Prime", Sector::Black, 64.0, 44.0),
    p("Monsoon Station", Sector::Black, 66.0, 46.0),
    p("Ganges Nexus", Sector::Black, 68.0, 48.0),
    p("Spice World", Sector::Black, 70.0, 50.0),
    p("Bengal Station", Sector::Black, 67.0, 52.0),
    // Phoenix
    p("Dragon's Reach", Sector::Red, 72.0, 36.0),
    p("Techno Prime", Sector::Red, 76.0, 38.0),
    p("Pearl Harbor", Sector::Red, 74.0, 42.0),
    p("Sakura Station", Sector::Red, 78.0, 40.0),
    p("Neon City", Sector::Red, 80.0, 38.0),
    p("Jade World", Sector::Red, 75.0, 45.0),
    p("Harbor Prime", Sector::Red, 73.0, 48.0),
    p("Temple Station", Sector::Red, 71.0, 52.0),
    p("Mekong Nexus", Sector::Red, 74.0, 54.0),
    p("Archipelago Prime", Sector::Red, 77.0, 50.0),
    p("Equator Station", Sector::Red, 79.0, 56.0),
    p("Southern Cross", Sector::Red, 82.0, 65.0),
];

pub fn planet(name: &str) -> Option<&'static Planet> {
    PLANETS.iter().find(|p| p.name == name)
}

pub fn planet_position(name: &str) -> (f32, f32) {
    planet(name).map(|p| (p.x, p.y)).unwrap_or(MAP_CENTER)
}

impl Planet {
    // First other planet close enough to draw a route line to
    pub fn route_neighbor(&self) -> Option<&'static Planet> {
        PLANETS.iter().find(|other| {
            other.name != self.name
                && (other.x - self.x).abs() < 15.0
                && (other.y - self.y).abs() < 10.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sectors() {
        for sector in Sector::ALL {
            assert_eq!(PLANETS.iter().filter(|p| p.sector == sector).count(), 12);
        }
        assert!(planet("Nova Haven").is_some());
    }

    #[test]
    fn test_unknown_planet_falls_back_to_center() {
        assert_eq!(planet_position("Cryos"), (20.0, 28.0));
        assert_eq!(planet_position("Earth"), MAP_CENTER);
    }

    #[test]
    fn test_route_neighbor() {
        let kepler = planet("Kepler Prime").unwrap();
        let neighbor = kepler.route_neighbor().unwrap();
        assert_ne!(neighbor.name, kepler.name);
        let southern_cross = planet("Southern Cross").unwrap();
        assert_eq!(
            southern_cross.route_neighbor().map(|p| p.name),
            Some("Equator Station")
        );
    }
}
