//! Cache de respuestas del proveedor geo
//!
//! Las respuestas de autocomplete, geocoding y distancia se cachean en Redis
//! con claves md5 del query normalizado. El cache nunca es autoritativo:
//! un fallo de Redis se trata como cache miss.

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::{redis_client::RedisClient, CacheOperations};

/// TTL para resultados de autocomplete y geocoding (las ciudades no se mueven)
const GEO_LOOKUP_TTL: u64 = 86_400; // 24 horas

/// TTL para distancias de ruta
const GEO_DISTANCE_TTL: u64 = 86_400 * 7; // 7 días

/// Tipo de lookup geo cacheado
#[derive(Debug, Clone, Copy)]
pub enum GeoCacheKind {
    Autocomplete,
    Geocode,
    Distance,
}

#[derive(Clone)]
pub struct GeoCache {
    redis: RedisClient,
}

impl GeoCache {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    /// Normalizar y hashear el query para usarlo como clave
    fn query_hash(query: &str) -> String {
        let normalized = query.trim().to_lowercase();
        format!("{:x}", md5::compute(normalized.as_bytes()))
    }

    fn key_for(&self, kind: GeoCacheKind, query: &str) -> String {
        let hash = Self::query_hash(query);
        match kind {
            GeoCacheKind::Autocomplete => self.redis.geo_autocomplete_key(&hash),
            GeoCacheKind::Geocode => self.redis.geo_geocode_key(&hash),
            GeoCacheKind::Distance => self.redis.geo_distance_key(&hash),
        }
    }

    /// Leer una respuesta cacheada
    pub async fn get<T: DeserializeOwned>(&self, kind: GeoCacheKind, query: &str) -> Option<T> {
        let key = self.key_for(kind, query);
        match self.redis.get(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("⚠️ Error leyendo geo cache: {}", e);
                None
            }
        }
    }

    /// Guardar una respuesta; los errores de Redis no se propagan
    pub async fn put<T: Serialize + Send + Sync>(&self, kind: GeoCacheKind, query: &str, value: &T) {
        let key = self.key_for(kind, query);
        let ttl = match kind {
            GeoCacheKind::Distance => GEO_DISTANCE_TTL,
            _ => GEO_LOOKUP_TTL,
        };
        if let Err(e) = self.redis.set(&key, value, ttl).await {
            warn!("⚠️ Error guardando geo cache: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_hash_is_case_and_space_insensitive() {
        assert_eq!(GeoCache::query_hash("Dallas, TX"), GeoCache::query_hash("  dallas, tx "));
        assert_ne!(GeoCache::query_hash("Dallas, TX"), GeoCache::query_hash("Austin, TX"));
    }
}
