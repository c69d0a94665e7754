use tessera::prelude::*;

/// Three squares meeting around the origin: blue and green side by side
/// below the x axis, red centred above them.
pub fn populate(_systems: &mut Systems, entities: &mut Entities, _components: &mut Components) {
    entities.add(Renderable::new(Square::new(Color::BLUE), 50.0, -50.0).into());
    entities.add(Renderable::new(Square::new(Color::GREEN), -50.0, -50.0).into());
    entities.add(Renderable::new(Square::new(Color::RED), 0.0, 50.0).into());
}
