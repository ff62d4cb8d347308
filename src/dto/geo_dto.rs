use serde::{Deserialize, Serialize};

// Query de autocomplete de ciudades
#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    pub q: String,
}

// Sugerencia de ciudad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub city: String,
    pub state: String,
}

// Query de geocoding
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub city: String,
}

// Coordenadas resueltas
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// Query de distancia de ruta
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub origin: String,
    pub destination: String,
}

// Distancia en millas; `estimated` indica que el proveedor no pudo
// resolver la ruta y se devolvió una aproximación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub miles: i32,
    pub estimated: bool,
}
