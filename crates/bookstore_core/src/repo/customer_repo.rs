//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `cities` and `clients`.
//! - Client lookups by email and by city id.
//!
//! # Invariants
//! - Deleting a city keeps its clients and nulls their `city_id`.
//! - Email uniqueness and format are enforced by the schema only.

use super::delete_by_id;
use super::error::{ensure_connection_ready, RepoError, RepoResult};
use crate::db::schema::{CITIES, CLIENTS};
use crate::model::customer::{City, CityId, Client, ClientId, NewCity, NewClient};
use rusqlite::{params, Connection, Row};

const CLIENT_SELECT_SQL: &str = "SELECT
    client_id,
    name,
    email,
    city_id
FROM clients";

/// Which clients to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientFilter {
    #[default]
    All,
    /// Clients living in one city.
    InCity(CityId),
    /// Clients whose city was removed or never set.
    WithoutCity,
}

/// Repository interface for cities and clients.
pub trait CustomerRepository {
    fn create_city(&self, city: &NewCity) -> RepoResult<CityId>;
    fn get_city(&self, id: CityId) -> RepoResult<Option<City>>;
    fn list_cities(&self) -> RepoResult<Vec<City>>;
    fn delete_city(&self, id: CityId) -> RepoResult<()>;

    fn create_client(&self, client: &NewClient) -> RepoResult<ClientId>;
    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>>;
    fn find_client_by_email(&self, email: &str) -> RepoResult<Option<Client>>;
    fn list_clients(&self, filter: ClientFilter) -> RepoResult<Vec<Client>>;
    fn update_client_city(&self, id: ClientId, city_id: Option<CityId>) -> RepoResult<()>;
    fn delete_client(&self, id: ClientId) -> RepoResult<()>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[CITIES, CLIENTS])?;
        Ok(Self { conn })
    }

    fn query_clients(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Client>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_city(&self, city: &NewCity) -> RepoResult<CityId> {
        self.conn.execute(
            "INSERT INTO cities (name, delivery_days) VALUES (?1, ?2);",
            params![city.name.as_str(), city.delivery_days],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_city(&self, id: CityId) -> RepoResult<Option<City>> {
        let mut stmt = self.conn.prepare(
            "SELECT city_id, name, delivery_days
             FROM cities
             WHERE city_id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_city_row(row)?));
        }
        Ok(None)
    }

    fn list_cities(&self) -> RepoResult<Vec<City>> {
        let mut stmt = self.conn.prepare(
            "SELECT city_id, name, delivery_days
             FROM cities
             ORDER BY city_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut cities = Vec::new();
        while let Some(row) = rows.next()? {
            cities.push(parse_city_row(row)?);
        }
        Ok(cities)
    }

    fn delete_city(&self, id: CityId) -> RepoResult<()> {
        delete_by_id(self.conn, CITIES, "city_id", "city", id)
    }

    fn create_client(&self, client: &NewClient) -> RepoResult<ClientId> {
        self.conn.execute(
            "INSERT INTO clients (name, email, city_id) VALUES (?1, ?2, ?3);",
            params![client.name.as_str(), client.email.as_str(), client.city_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let found = self.query_clients(&format!("{CLIENT_SELECT_SQL} WHERE client_id = ?1;"), [id])?;
        Ok(found.into_iter().next())
    }

    fn find_client_by_email(&self, email: &str) -> RepoResult<Option<Client>> {
        let found = self.query_clients(&format!("{CLIENT_SELECT_SQL} WHERE email = ?1;"), [email])?;
        Ok(found.into_iter().next())
    }

    fn list_clients(&self, filter: ClientFilter) -> RepoResult<Vec<Client>> {
        match filter {
            ClientFilter::All => {
                self.query_clients(&format!("{CLIENT_SELECT_SQL} ORDER BY client_id ASC;"), [])
            }
            ClientFilter::InCity(city_id) => self.query_clients(
                &format!("{CLIENT_SELECT_SQL} WHERE city_id = ?1 ORDER BY client_id ASC;"),
                [city_id],
            ),
            ClientFilter::WithoutCity => self.query_clients(
                &format!("{CLIENT_SELECT_SQL} WHERE city_id IS NULL ORDER BY client_id ASC;"),
                [],
            ),
        }
    }

    fn update_client_city(&self, id: ClientId, city_id: Option<CityId>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE clients SET city_id = ?2 WHERE client_id = ?1;",
            params![id, city_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "client",
                id,
            });
        }
        Ok(())
    }

    fn delete_client(&self, id: ClientId) -> RepoResult<()> {
        delete_by_id(self.conn, CLIENTS, "client_id", "client", id)
    }
}

fn parse_city_row(row: &Row<'_>) -> RepoResult<City> {
    Ok(City {
        id: row.get("city_id")?,
        name: row.get("name")?,
        delivery_days: row.get("delivery_days")?,
    })
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    Ok(Client {
        id: row.get("client_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        city_id: row.get("city_id")?,
    })
}
