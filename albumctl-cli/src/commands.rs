//! Command implementations
//!
//! Every command talks to storage through `AlbumStore`, so the same code runs
//! against Postgres and the in-memory store.

use std::io::Write;
use std::time::Duration;

use albumctl_store::{migrations, sample_albums, with_deadline, AlbumStore, NewAlbum};
use anyhow::Context;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::output::Printer;
use crate::stage::{Stage, StageError, StageExt};
use crate::{AddArgs, Commands, DemoArgs};

/// Everything a command needs besides its arguments
pub struct Ctx<'a, W: Write> {
    pub store: &'a dyn AlbumStore,
    /// Present only when running against Postgres
    pub pool: Option<&'a PgPool>,
    pub deadline: Duration,
    pub out: Printer<W>,
}

pub async fn dispatch<W: Write>(command: Commands, ctx: &mut Ctx<'_, W>) -> Result<(), StageError> {
    match command {
        Commands::Demo(args) => run_demo(args, ctx).await,
        Commands::ByArtist { name } => {
            let albums = find_by_artist(ctx, &name).await?;
            ctx.out.albums(&albums).stage(Stage::Operation)
        }
        Commands::Get { id } => {
            let album = find_by_id(ctx, id).await?;
            ctx.out.album(&album).stage(Stage::Operation)
        }
        Commands::Add(args) => {
            let id = add(ctx, &args.into()).await?;
            ctx.out.added(id).stage(Stage::Operation)
        }
        Commands::Migrate => run_migrate(ctx).await,
        Commands::Seed => run_seed(ctx).await,
    }
}

/// Diagnostic query, then each album operation in turn. Stops at the first failure.
pub async fn run_demo<W: Write>(args: DemoArgs, ctx: &mut Ctx<'_, W>) -> Result<(), StageError> {
    let greeting = with_deadline(ctx.deadline, "greeting", ctx.store.greeting())
        .await
        .context("diagnostic query failed")
        .stage(Stage::Diagnostic)?;
    ctx.out.greeting(&greeting).stage(Stage::Operation)?;

    let albums = find_by_artist(ctx, &args.artist).await?;
    ctx.out.albums(&albums).stage(Stage::Operation)?;

    let album = find_by_id(ctx, args.id).await?;
    ctx.out.album(&album).stage(Stage::Operation)?;

    let candidate = NewAlbum::new(args.title, args.new_artist, args.price);
    let id = add(ctx, &candidate).await?;
    ctx.out.added(id).stage(Stage::Operation)
}

async fn find_by_artist<W: Write>(
    ctx: &Ctx<'_, W>,
    name: &str,
) -> Result<Vec<albumctl_store::Album>, StageError> {
    let albums = with_deadline(ctx.deadline, "albums_by_artist", ctx.store.albums_by_artist(name))
        .await
        .context("find albums failed")
        .stage(Stage::Operation)?;
    debug!(artist = name, count = albums.len(), "albums by artist");
    Ok(albums)
}

async fn find_by_id<W: Write>(ctx: &Ctx<'_, W>, id: i64) -> Result<albumctl_store::Album, StageError> {
    with_deadline(ctx.deadline, "album_by_id", ctx.store.album_by_id(id))
        .await
        .context("album by id failed")
        .stage(Stage::Operation)
}

async fn add<W: Write>(ctx: &Ctx<'_, W>, album: &NewAlbum) -> Result<i64, StageError> {
    let id = with_deadline(ctx.deadline, "add_album", ctx.store.add_album(album))
        .await
        .context("add album failed")
        .stage(Stage::Operation)?;
    info!(id, title = %album.title, "album added");
    Ok(id)
}

async fn run_migrate<W: Write>(ctx: &mut Ctx<'_, W>) -> Result<(), StageError> {
    match ctx.pool {
        Some(pool) => migrations::run(pool)
            .await
            .context("migrate failed")
            .stage(Stage::Operation),
        None => {
            info!("in-memory store has no schema to migrate");
            Ok(())
        }
    }
}

async fn run_seed<W: Write>(ctx: &mut Ctx<'_, W>) -> Result<(), StageError> {
    for album in sample_albums() {
        let id = add(ctx, &album).await?;
        ctx.out.added(id).stage(Stage::Operation)?;
    }
    Ok(())
}

impl From<AddArgs> for NewAlbum {
    fn from(args: AddArgs) -> Self {
        NewAlbum::new(args.title, args.artist, args.price)
    }
}
