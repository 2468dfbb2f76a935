// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::{clock::BusinessClock, i18n::I18nStore},
    db::{
        store::{MenuSource, OrderSource, RestaurantDirectory, StaffSource},
        MenuRepository, OrderRepository, RestaurantRepository, StaffRepository,
    },
    models::report::TaxBase,
    services::{
        access_service::AccessScopeResolver, auth::AuthService, metrics_service::MetricsAggregator,
        report_service::EndOfDayReportBuilder,
    },
};

// Tudo que vem do ambiente (.env em dev)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub clock: BusinessClock,
    pub tax_base: TaxBase,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bind_addr = env_or("BIND_ADDR", "0.0.0.0:3000")
            .parse()
            .context("BIND_ADDR inválido")?;
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS inválido")?;
        let acquire_secs: u64 = env_or("DB_ACQUIRE_TIMEOUT_SECS", "3")
            .parse()
            .context("DB_ACQUIRE_TIMEOUT_SECS inválido")?;

        let offset_minutes: i32 = env_or("BUSINESS_UTC_OFFSET_MINUTES", "0")
            .parse()
            .context("BUSINESS_UTC_OFFSET_MINUTES inválido")?;
        let clock = BusinessClock::from_offset_minutes(offset_minutes)
            .ok_or_else(|| anyhow!("BUSINESS_UTC_OFFSET_MINUTES fora de ±24h: {}", offset_minutes))?;

        let raw_tax_base = env_or("GST_BASE", "subtotal_plus_service");
        let tax_base = TaxBase::parse(&raw_tax_base)
            .ok_or_else(|| anyhow!("GST_BASE deve ser 'subtotal_plus_service' ou 'subtotal', veio '{}'", raw_tax_base))?;

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            clock,
            tax_base,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// As capacidades de leitura que os serviços recebem.
#[derive(Clone)]
pub struct Stores {
    pub restaurants: Arc<dyn RestaurantDirectory>,
    pub orders: Arc<dyn OrderSource>,
    pub staff: Arc<dyn StaffSource>,
    pub menu: Arc<dyn MenuSource>,
}

impl Stores {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            restaurants: Arc::new(RestaurantRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            staff: Arc::new(StaffRepository::new(pool.clone())),
            menu: Arc::new(MenuRepository::new(pool.clone())),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub i18n_store: Arc<I18nStore>,
    pub clock: BusinessClock,
    pub auth_service: AuthService,
    pub access_resolver: AccessScopeResolver,
    pub metrics_service: MetricsAggregator,
    pub report_service: EndOfDayReportBuilder,
}

impl AppState {
    pub async fn connect(config: &Config) -> anyhow::Result<(Self, PgPool)> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let state = Self::build(config, Stores::postgres(&db_pool));
        Ok((state, db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn build(config: &Config, stores: Stores) -> Self {
        Self {
            i18n_store: Arc::new(I18nStore::new()),
            clock: config.clock,
            auth_service: AuthService::new(&config.jwt_secret),
            access_resolver: AccessScopeResolver::new(stores.restaurants.clone()),
            metrics_service: MetricsAggregator::new(stores.orders.clone(), stores.staff, config.clock),
            report_service: EndOfDayReportBuilder::new(
                stores.restaurants,
                stores.orders,
                stores.menu,
                config.clock,
                config.tax_base,
            ),
        }
    }
}
